use crate::models::{History, KeyFrameSet};

/// Collects candidate frames from the scorers and keeps the usable ones
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyFrameSelector;

impl KeyFrameSelector {
    pub fn new() -> Self {
        Self
    }

    /// Deduplicate candidates, dropping indices outside the history and
    /// frames without a detection
    pub fn select<I>(&self, candidates: I, history: &History) -> KeyFrameSet
    where
        I: IntoIterator<Item = usize>,
    {
        candidates
            .into_iter()
            .filter(|&index| history.has_landmarks_at(index))
            .collect()
    }
}
