/// Key-frame screenshot rendering
///
/// Reads the requested frames from a `FrameSource`, optionally draws the
/// detected skeleton on top and returns the frames as base64 JPEG strings,
/// ready to embed in an analysis response.

use anyhow::{Context, Result};
use base64ct::{Base64, Encoding};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use std::collections::BTreeMap;

use crate::models::{History, KeyFrameSet, Landmark, LandmarkSet, PoseLandmark, POSE_CONNECTIONS};

/// Seekable sequence of decoded video frames
pub trait FrameSource {
    /// Total number of frames
    fn frame_count(&self) -> usize;

    /// Decode frame `index`; `Ok(None)` when the frame cannot be read
    fn read_frame(&mut self, index: usize) -> Result<Option<DynamicImage>>;
}

impl FrameSource for Vec<DynamicImage> {
    fn frame_count(&self) -> usize {
        self.len()
    }

    fn read_frame(&mut self, index: usize) -> Result<Option<DynamicImage>> {
        Ok(self.get(index).cloned())
    }
}

const LANDMARK_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const CONNECTION_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Screenshot service
#[derive(Debug, Clone)]
pub struct ScreenshotService {
    jpeg_quality: u8,
    min_visibility: f64,
    point_radius: i32,
}

impl ScreenshotService {
    pub fn new() -> Self {
        Self {
            jpeg_quality: 85,
            min_visibility: 0.5,
            point_radius: 3,
        }
    }

    /// Set the JPEG quality
    ///
    /// Default: 85
    /// Range: 1 - 100
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set the visibility below which landmarks are not drawn
    ///
    /// Default: 0.5
    /// Range: 0.0 - 1.0
    pub fn with_min_visibility(mut self, min_visibility: f64) -> Self {
        self.min_visibility = min_visibility.clamp(0.0, 1.0);
        self
    }

    /// Render the requested frames in ascending index order
    ///
    /// Frames the source cannot provide are skipped, so the result may be
    /// shorter than `requests`.
    pub fn extract<S>(
        &self,
        source: &mut S,
        requests: &BTreeMap<usize, Option<LandmarkSet>>,
    ) -> Result<Vec<String>>
    where
        S: FrameSource + ?Sized,
    {
        let mut screenshots = Vec::with_capacity(requests.len());

        for (&index, landmarks) in requests {
            if index >= source.frame_count() {
                tracing::warn!(index, "Key frame is beyond the end of the video");
                continue;
            }

            let frame = match source.read_frame(index) {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    tracing::warn!(index, "Could not read key frame");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(index, "Failed to decode key frame: {}", e);
                    continue;
                }
            };

            let mut image = frame.to_rgb8();
            if let Some(landmarks) = landmarks {
                self.draw_landmarks(&mut image, landmarks);
            }

            let encoded = self
                .encode_jpeg(&image)
                .with_context(|| format!("Failed to encode key frame {}", index))?;
            screenshots.push(encoded);
        }

        Ok(screenshots)
    }

    /// Draw skeleton connections and landmark points onto `image`
    ///
    /// Slots outside the 33-point scheme are ignored; points off the frame
    /// are clipped.
    pub fn draw_landmarks(&self, image: &mut RgbImage, landmarks: &LandmarkSet) {
        for (from, to) in POSE_CONNECTIONS {
            if let (Some(a), Some(b)) = (self.drawable(landmarks.get(from)), self.drawable(landmarks.get(to))) {
                let start = to_pixel(image, a);
                let end = to_pixel(image, b);
                draw_line_segment_mut(image, start, end, CONNECTION_COLOR);
            }
        }

        for (index, landmark) in landmarks.iter() {
            if PoseLandmark::from_index(index).is_none() {
                continue;
            }
            if let Some(landmark) = self.drawable(Some(landmark)) {
                let (x, y) = to_pixel(image, landmark);
                let center = (x.round() as i32, y.round() as i32);
                draw_filled_circle_mut(image, center, self.point_radius, LANDMARK_COLOR);
            }
        }
    }

    fn drawable<'a>(&self, landmark: Option<&'a Landmark>) -> Option<&'a Landmark> {
        landmark.filter(|lm| lm.visibility >= self.min_visibility)
    }

    fn encode_jpeg(&self, image: &RgbImage) -> Result<String> {
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.jpeg_quality)
            .encode_image(image)
            .context("JPEG encoding failed")?;
        Ok(Base64::encode_string(&bytes))
    }
}

impl Default for ScreenshotService {
    fn default() -> Self {
        Self::new()
    }
}

/// Pair each key frame with the landmarks to overlay on it
pub fn screenshot_requests(
    history: &History,
    key_frames: &KeyFrameSet,
) -> BTreeMap<usize, Option<LandmarkSet>> {
    key_frames
        .iter()
        .map(|&index| {
            let landmarks = history.get(index).and_then(|frame| frame.landmarks.clone());
            (index, landmarks)
        })
        .collect()
}

fn to_pixel(image: &RgbImage, landmark: &Landmark) -> (f32, f32) {
    (
        (landmark.x * image.width() as f64) as f32,
        (landmark.y * image.height() as f64) as f32,
    )
}
