use serde::{Deserialize, Serialize};

use super::landmark::LandmarkSet;

/// Landmark detection result for a single decoded frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Frame number in sequence
    #[serde(alias = "frame")]
    pub frame_index: usize,
    /// Frame timestamp in seconds
    #[serde(default)]
    pub timestamp: f64,
    /// Detected landmarks, `None` when no pose was found
    #[serde(default)]
    pub landmarks: Option<LandmarkSet>,
}

impl FrameRecord {
    pub fn new(frame_index: usize, timestamp: f64, landmarks: Option<LandmarkSet>) -> Self {
        Self {
            frame_index,
            timestamp,
            landmarks,
        }
    }

    /// Whether the pose provider detected a body in this frame
    pub fn has_landmarks(&self) -> bool {
        self.landmarks.is_some()
    }
}

/// Full per-frame landmark record of one video
///
/// Covers every decoded frame, including frames without a detection, so that
/// position in the history is the frame's position in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<FrameRecord>);

impl History {
    pub fn new(frames: Vec<FrameRecord>) -> Self {
        Self(frames)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameRecord> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FrameRecord> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FrameRecord> {
        self.0.get_mut(index)
    }

    pub fn push(&mut self, frame: FrameRecord) {
        self.0.push(frame);
    }

    /// Whether `index` refers to a frame that carries landmarks
    pub fn has_landmarks_at(&self, index: usize) -> bool {
        self.get(index).is_some_and(FrameRecord::has_landmarks)
    }

    /// Number of frames with a detection
    pub fn detected_frame_count(&self) -> usize {
        self.0.iter().filter(|frame| frame.has_landmarks()).count()
    }

    /// Check that frame indices start at 0 and increase by exactly one
    pub fn is_contiguous(&self) -> bool {
        self.0
            .iter()
            .enumerate()
            .all(|(position, frame)| frame.frame_index == position)
    }
}

impl From<Vec<FrameRecord>> for History {
    fn from(frames: Vec<FrameRecord>) -> Self {
        Self(frames)
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a FrameRecord;
    type IntoIter = std::slice::Iter<'a, FrameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
