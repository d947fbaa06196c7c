// Data models for landmark histories and analysis results

pub mod analysis;
pub mod history;
pub mod landmark;

pub use analysis::*;
pub use history::*;
pub use landmark::*;
