/// Body landmark models
///
/// This module provides the per-frame landmark representation produced by the
/// pose provider: single landmarks, the 33-point anatomical index scheme and
/// the landmark set that holds one detection.

use serde::{Deserialize, Deserializer, Serialize};

/// Single tracked body point for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// X coordinate (normalized 0-1 relative to frame width)
    pub x: f64,
    /// Y coordinate (normalized 0-1 relative to frame height, grows downwards)
    pub y: f64,
    /// Depth relative to the hips (same scale as x), when the provider reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Detection confidence (0-1)
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    /// Create a new landmark
    pub fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            visibility,
        }
    }

    /// Create a landmark without depth
    pub fn planar(x: f64, y: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility,
        }
    }

    /// Read one coordinate; depth is missing when it was not reported
    pub fn coordinate(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => Some(self.x),
            Axis::Y => Some(self.y),
            Axis::Z => self.z,
        }
    }

    /// Position as a 3D vector, when depth is known
    pub fn position(&self) -> Option<[f64; 3]> {
        Some([self.x, self.y, self.z?])
    }

    /// Position projected onto the image plane
    pub fn planar_position(&self) -> [f64; 3] {
        [self.x, self.y, 0.0]
    }
}

/// Coordinate axis of a landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// BlazePose landmark indices (33 points)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

/// Number of landmarks in a complete set
pub const POSE_LANDMARK_COUNT: usize = 33;

impl PoseLandmark {
    /// Index of this landmark inside a landmark set
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get landmark name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "left_eye_inner",
            Self::LeftEye => "left_eye",
            Self::LeftEyeOuter => "left_eye_outer",
            Self::RightEyeInner => "right_eye_inner",
            Self::RightEye => "right_eye",
            Self::RightEyeOuter => "right_eye_outer",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::MouthLeft => "mouth_left",
            Self::MouthRight => "mouth_right",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftPinky => "left_pinky",
            Self::RightPinky => "right_pinky",
            Self::LeftIndex => "left_index",
            Self::RightIndex => "right_index",
            Self::LeftThumb => "left_thumb",
            Self::RightThumb => "right_thumb",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }

    /// Look up a landmark by its index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Get all landmarks in index order
    pub fn all() -> [Self; POSE_LANDMARK_COUNT] {
        [
            Self::Nose,
            Self::LeftEyeInner,
            Self::LeftEye,
            Self::LeftEyeOuter,
            Self::RightEyeInner,
            Self::RightEye,
            Self::RightEyeOuter,
            Self::LeftEar,
            Self::RightEar,
            Self::MouthLeft,
            Self::MouthRight,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftPinky,
            Self::RightPinky,
            Self::LeftIndex,
            Self::RightIndex,
            Self::LeftThumb,
            Self::RightThumb,
            Self::LeftHip,
            Self::RightHip,
            Self::LeftKnee,
            Self::RightKnee,
            Self::LeftAnkle,
            Self::RightAnkle,
            Self::LeftHeel,
            Self::RightHeel,
            Self::LeftFootIndex,
            Self::RightFootIndex,
        ]
    }
}

/// Body skeleton edges used when drawing a detection
pub const POSE_CONNECTIONS: [(PoseLandmark, PoseLandmark); 16] = [
    (PoseLandmark::LeftShoulder, PoseLandmark::RightShoulder),
    (PoseLandmark::LeftShoulder, PoseLandmark::LeftElbow),
    (PoseLandmark::LeftElbow, PoseLandmark::LeftWrist),
    (PoseLandmark::RightShoulder, PoseLandmark::RightElbow),
    (PoseLandmark::RightElbow, PoseLandmark::RightWrist),
    (PoseLandmark::LeftShoulder, PoseLandmark::LeftHip),
    (PoseLandmark::RightShoulder, PoseLandmark::RightHip),
    (PoseLandmark::LeftHip, PoseLandmark::RightHip),
    (PoseLandmark::LeftHip, PoseLandmark::LeftKnee),
    (PoseLandmark::LeftKnee, PoseLandmark::LeftAnkle),
    (PoseLandmark::RightHip, PoseLandmark::RightKnee),
    (PoseLandmark::RightKnee, PoseLandmark::RightAnkle),
    (PoseLandmark::LeftAnkle, PoseLandmark::LeftHeel),
    (PoseLandmark::LeftHeel, PoseLandmark::LeftFootIndex),
    (PoseLandmark::RightAnkle, PoseLandmark::RightHeel),
    (PoseLandmark::RightHeel, PoseLandmark::RightFootIndex),
];

/// Landmarks of one detection, indexed by anatomical id
///
/// Individual slots may be empty when the provider only reported part of the
/// body. Serialized as a plain JSON array with `null` for empty slots; on
/// input, a slot without both `x` and `y` (such as `{}`) is also empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LandmarkSet(Vec<Option<Landmark>>);

/// Wire form of one slot, tolerant of partially reported points
#[derive(Deserialize)]
struct LandmarkSlot {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    visibility: Option<f64>,
}

impl LandmarkSlot {
    fn into_landmark(self) -> Option<Landmark> {
        Some(Landmark {
            x: self.x?,
            y: self.y?,
            z: self.z,
            visibility: self.visibility.unwrap_or(0.0),
        })
    }
}

impl<'de> Deserialize<'de> for LandmarkSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let slots = Vec::<Option<LandmarkSlot>>::deserialize(deserializer)?;
        let slots = slots
            .into_iter()
            .map(|slot| slot.and_then(LandmarkSlot::into_landmark))
            .collect();
        Ok(Self(slots))
    }
}

impl LandmarkSet {
    /// Create a complete set from provider output
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self(landmarks.into_iter().map(Some).collect())
    }

    /// Create a set where some slots may be empty
    pub fn from_slots(slots: Vec<Option<Landmark>>) -> Self {
        Self(slots)
    }

    /// Create a set of `POSE_LANDMARK_COUNT` empty slots
    pub fn empty() -> Self {
        Self(vec![None; POSE_LANDMARK_COUNT])
    }

    /// Builder-style setter for one slot, growing the set when needed
    pub fn with(mut self, landmark: PoseLandmark, value: Landmark) -> Self {
        self.set(landmark, value);
        self
    }

    /// Set one slot, growing the set when needed
    pub fn set(&mut self, landmark: PoseLandmark, value: Landmark) {
        let index = landmark.index();
        if self.0.len() <= index {
            self.0.resize(index + 1, None);
        }
        self.0[index] = Some(value);
    }

    /// Get landmark by anatomical id
    pub fn get(&self, landmark: PoseLandmark) -> Option<&Landmark> {
        self.get_by_index(landmark.index())
    }

    /// Get landmark by raw index; out-of-range indices read as missing
    pub fn get_by_index(&self, index: usize) -> Option<&Landmark> {
        self.0.get(index).and_then(Option::as_ref)
    }

    /// Number of slots in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over populated slots with their index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Landmark)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|lm| (index, lm)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_coordinates() {
        let lm = Landmark::new(0.1, 0.2, 0.3, 0.9);
        assert_eq!(lm.coordinate(Axis::X), Some(0.1));
        assert_eq!(lm.coordinate(Axis::Y), Some(0.2));
        assert_eq!(lm.coordinate(Axis::Z), Some(0.3));
        assert_eq!(lm.position(), Some([0.1, 0.2, 0.3]));
    }

    #[test]
    fn test_planar_landmark_has_no_depth() {
        let lm = Landmark::planar(0.1, 0.2, 0.9);
        assert_eq!(lm.coordinate(Axis::Z), None);
        assert_eq!(lm.position(), None);
        assert_eq!(lm.planar_position(), [0.1, 0.2, 0.0]);
    }

    #[test]
    fn test_pose_landmark_indices() {
        assert_eq!(PoseLandmark::LeftShoulder.index(), 11);
        assert_eq!(PoseLandmark::RightShoulder.index(), 12);
        assert_eq!(PoseLandmark::LeftHip.index(), 23);
        assert_eq!(PoseLandmark::RightHip.index(), 24);
        assert_eq!(PoseLandmark::LeftKnee.index(), 25);
        assert_eq!(PoseLandmark::RightKnee.index(), 26);
        assert_eq!(PoseLandmark::LeftAnkle.index(), 27);
        assert_eq!(PoseLandmark::RightAnkle.index(), 28);
        assert_eq!(PoseLandmark::LeftFootIndex.index(), 31);
        assert_eq!(PoseLandmark::RightFootIndex.index(), 32);
    }

    #[test]
    fn test_all_landmarks_match_their_index() {
        for (position, landmark) in PoseLandmark::all().iter().enumerate() {
            assert_eq!(landmark.index(), position);
            assert_eq!(PoseLandmark::from_index(position), Some(*landmark));
        }
        assert_eq!(PoseLandmark::from_index(POSE_LANDMARK_COUNT), None);
    }

    #[test]
    fn test_pose_landmark_names() {
        assert_eq!(PoseLandmark::Nose.name(), "nose");
        assert_eq!(PoseLandmark::LeftHip.name(), "left_hip");
        assert_eq!(PoseLandmark::RightFootIndex.name(), "right_foot_index");
    }

    #[test]
    fn test_landmark_set_lookup() {
        let set = LandmarkSet::empty().with(PoseLandmark::LeftHip, Landmark::new(0.5, 0.6, 0.0, 1.0));

        assert_eq!(set.len(), POSE_LANDMARK_COUNT);
        assert_eq!(set.get(PoseLandmark::LeftHip).map(|lm| lm.y), Some(0.6));
        assert!(set.get(PoseLandmark::RightHip).is_none());
        assert!(set.get_by_index(100).is_none());
        assert_eq!(set.iter().count(), 1);
    }

    #[test]
    fn test_short_landmark_set_reads_missing() {
        let set = LandmarkSet::new(vec![Landmark::new(0.5, 0.5, 0.0, 1.0); 5]);
        assert!(set.get(PoseLandmark::LeftHip).is_none());
        assert!(set.get(PoseLandmark::Nose).is_some());
    }

    #[test]
    fn test_landmark_set_json() {
        let json = r#"[{"x": 0.5, "y": 0.25}, null]"#;
        let set: LandmarkSet = serde_json::from_str(json).unwrap();

        assert_eq!(set.len(), 2);
        let nose = set.get(PoseLandmark::Nose).unwrap();
        assert_eq!(nose.z, None);
        assert_eq!(nose.visibility, 0.0);
        assert!(set.get_by_index(1).is_none());
    }

    #[test]
    fn test_empty_object_slots_read_missing() {
        let json = r#"[{}, {"x": 0.5, "y": 0.5}, {"x": 0.1}, {"x": 0.2, "y": 0.3, "z": -0.1, "visibility": 0.8}]"#;
        let set: LandmarkSet = serde_json::from_str(json).unwrap();

        assert_eq!(set.len(), 4);
        assert!(set.get(PoseLandmark::Nose).is_none());
        assert_eq!(set.get_by_index(1), Some(&Landmark::planar(0.5, 0.5, 0.0)));
        assert!(set.get_by_index(2).is_none());
        assert_eq!(set.get_by_index(3), Some(&Landmark::new(0.2, 0.3, -0.1, 0.8)));
    }

    #[test]
    fn test_set_without_depth_serializes_without_z() {
        let set = LandmarkSet::from_slots(vec![Some(Landmark::planar(0.5, 0.5, 1.0)), None]);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!([{"x": 0.5, "y": 0.5, "visibility": 1.0}, null]));
    }
}
