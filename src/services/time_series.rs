/// Landmark time-series extraction
///
/// Projects a history into per-landmark, per-axis sequences. Every series has
/// one element per frame; frames without the landmark carry `None`, so index
/// `i` of any series always refers to frame `i` of the history.

use statrs::statistics::Statistics;

use super::geometry::midpoint;
use crate::models::{Axis, History, PoseLandmark};

/// Per-frame values with `None` for frames lacking the data
pub type Series = Vec<Option<f64>>;

/// Extract one coordinate of one landmark for every frame
pub fn extract_series(history: &History, landmark: PoseLandmark, axis: Axis) -> Series {
    extract_series_by_index(history, landmark.index(), axis)
}

/// Extract one coordinate by raw landmark index; unknown indices yield an
/// all-missing series
pub fn extract_series_by_index(history: &History, index: usize, axis: Axis) -> Series {
    history
        .iter()
        .map(|frame| {
            frame
                .landmarks
                .as_ref()
                .and_then(|set| set.get_by_index(index))
                .and_then(|lm| lm.coordinate(axis))
        })
        .collect()
}

/// Combine two aligned series element-wise; missing on either side stays missing
pub fn zip_with(a: &[Option<f64>], b: &[Option<f64>], f: impl Fn(f64, f64) -> f64) -> Series {
    a.iter()
        .zip(b)
        .map(|(lhs, rhs)| match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => Some(f(*lhs, *rhs)),
            _ => None,
        })
        .collect()
}

/// Element-wise midpoint of two series
pub fn midpoint_series(a: &[Option<f64>], b: &[Option<f64>]) -> Series {
    a.iter().zip(b).map(|(lhs, rhs)| midpoint(*lhs, *rhs)).collect()
}

/// First difference `s[i + 1] - s[i]`; one element shorter than the input
pub fn diff(series: &[Option<f64>]) -> Series {
    series
        .windows(2)
        .map(|pair| match (pair[0], pair[1]) {
            (Some(prev), Some(next)) => Some(next - prev),
            _ => None,
        })
        .collect()
}

/// Present values in order
pub fn valid_values(series: &[Option<f64>]) -> Vec<f64> {
    series.iter().flatten().copied().collect()
}

/// Mean of present values
pub fn mean(series: &[Option<f64>]) -> Option<f64> {
    let values = valid_values(series);
    if values.is_empty() {
        return None;
    }
    Some(values.iter().mean())
}

/// Population standard deviation of present values
pub fn population_std_dev(series: &[Option<f64>]) -> Option<f64> {
    let values = valid_values(series);
    if values.is_empty() {
        return None;
    }
    Some(values.iter().population_std_dev())
}

/// `max - min` over present values
pub fn value_range(series: &[Option<f64>]) -> Option<f64> {
    let (min_idx, max_idx) = (arg_min(series)?, arg_max(series)?);
    Some(series[max_idx]? - series[min_idx]?)
}

/// Index of the first maximum among present values
pub fn arg_max(series: &[Option<f64>]) -> Option<usize> {
    arg_extremum(series, |candidate, best| candidate > best)
}

/// Index of the first minimum among present values
pub fn arg_min(series: &[Option<f64>]) -> Option<usize> {
    arg_extremum(series, |candidate, best| candidate < best)
}

fn arg_extremum(series: &[Option<f64>], better: impl Fn(f64, f64) -> bool) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, value) in series.iter().enumerate() {
        let Some(value) = *value else { continue };
        match best {
            Some((_, current)) if !better(value, current) => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}
