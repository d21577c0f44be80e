use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::error::TrackError;
use crate::frame::Frame;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectMode {
    /// Per-channel absolute difference against the previous frame.
    TemporalDiff,
    /// Threshold the current frame's channel values directly; picks up
    /// bright regions instead of motion.
    StaticLuma,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

const WEIGHT_R: f64 = 0.299;
const WEIGHT_G: f64 = 0.587;
const WEIGHT_B: f64 = 0.114;

/// Squared perceptual-weighted magnitude of a channel triple. Weights apply
/// to squared channel values, not to plain single-frame luma. Thresholds are
/// compared in squared space so no sqrt is ever taken.
#[inline]
pub fn weighted_magnitude_sq(r: u8, g: u8, b: u8) -> f64 {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    WEIGHT_R * r * r + WEIGHT_G * g * g + WEIGHT_B * b * b
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl ActivityMask {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn is_active(&self, x: u32, y: u32) -> bool {
        self.cells[(y * self.width + x) as usize]
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Active coordinates in row-major scan order.
    pub fn active_points(&self) -> Vec<Point> {
        let mut points = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[(y * self.width + x) as usize] {
                    points.push(Point { x, y });
                }
            }
        }
        points
    }
}

/// Per-tick change detection. The reference frame is explicit state owned
/// by the detector and must be cleared at episode boundaries.
#[derive(Clone, Debug)]
pub struct ChangeDetector {
    mode: DetectMode,
    threshold_sq: f64,
    reference: Option<Frame>,
}

impl ChangeDetector {
    pub fn new(mode: DetectMode, threshold: f64) -> Self {
        Self {
            mode,
            threshold_sq: threshold * threshold,
            reference: None,
        }
    }

    #[inline]
    pub fn mode(&self) -> DetectMode {
        self.mode
    }

    /// Drops the reference frame. The next temporal mask is computed against
    /// an all-zero baseline, i.e. raw brightness thresholding.
    pub fn reset(&mut self) {
        self.reference = None;
    }

    pub fn detect(&mut self, frame: &Frame) -> Result<ActivityMask, TrackError> {
        match self.mode {
            DetectMode::StaticLuma => Ok(value_mask(frame, self.threshold_sq)),
            DetectMode::TemporalDiff => {
                if let Some(reference) = &self.reference {
                    if !reference.same_shape(frame) {
                        return Err(TrackError::ShapeMismatch {
                            expected_width: reference.width(),
                            expected_height: reference.height(),
                            width: frame.width(),
                            height: frame.height(),
                        });
                    }
                }
                let mask = match &self.reference {
                    Some(reference) => diff_mask(frame, reference, self.threshold_sq),
                    None => value_mask(frame, self.threshold_sq),
                };
                self.reference = Some(frame.clone());
                Ok(mask)
            }
        }
    }
}

fn value_mask(frame: &Frame, threshold_sq: f64) -> ActivityMask {
    let mut cells = Vec::with_capacity(frame.pixel_count());
    for px in frame.data().chunks_exact(3) {
        cells.push(weighted_magnitude_sq(px[0], px[1], px[2]) > threshold_sq);
    }
    ActivityMask {
        width: frame.width(),
        height: frame.height(),
        cells,
    }
}

fn diff_mask(current: &Frame, reference: &Frame, threshold_sq: f64) -> ActivityMask {
    let mut cells = Vec::with_capacity(current.pixel_count());
    for (cur, prev) in current
        .data()
        .chunks_exact(3)
        .zip(reference.data().chunks_exact(3))
    {
        let dr = cur[0].abs_diff(prev[0]);
        let dg = cur[1].abs_diff(prev[1]);
        let db = cur[2].abs_diff(prev[2]);
        cells.push(weighted_magnitude_sq(dr, dg, db) > threshold_sq);
    }
    ActivityMask {
        width: current.width(),
        height: current.height(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ChannelOrder;

    fn detector(mode: DetectMode, threshold: f64) -> ChangeDetector {
        ChangeDetector::new(mode, threshold)
    }

    #[test]
    fn identical_frames_produce_an_all_zero_mask() {
        let mut det = detector(DetectMode::TemporalDiff, 120.0);
        let frame = Frame::solid(8, 6, [200, 180, 90]);
        det.detect(&frame).unwrap();
        let mask = det.detect(&frame).unwrap();
        assert_eq!(mask.active_count(), 0);
        assert!(mask.active_points().is_empty());
    }

    #[test]
    fn black_to_white_flip_flags_every_pixel_at_default_threshold() {
        let mut det = detector(DetectMode::TemporalDiff, 120.0);
        det.detect(&Frame::zero(8, 6)).unwrap();
        let mask = det.detect(&Frame::solid(8, 6, [255, 255, 255])).unwrap();
        assert_eq!(mask.active_count(), 8 * 6);
    }

    #[test]
    fn first_tick_thresholds_raw_brightness() {
        let mut det = detector(DetectMode::TemporalDiff, 120.0);
        let mut frame = Frame::zero(4, 4);
        frame.put_rgb(1, 2, [255, 255, 255]);
        let mask = det.detect(&frame).unwrap();
        assert_eq!(mask.active_points(), alloc::vec![Point { x: 1, y: 2 }]);
    }

    #[test]
    fn threshold_excludes_changes_below_it() {
        let mut det = detector(DetectMode::TemporalDiff, 120.0);
        det.detect(&Frame::zero(2, 2)).unwrap();
        let mask = det.detect(&Frame::solid(2, 2, [119, 119, 119])).unwrap();
        assert_eq!(mask.active_count(), 0);

        let mut det = detector(DetectMode::TemporalDiff, 120.0);
        det.detect(&Frame::zero(2, 2)).unwrap();
        let mask = det.detect(&Frame::solid(2, 2, [122, 122, 122])).unwrap();
        assert_eq!(mask.active_count(), 4);
    }

    #[test]
    fn static_mode_flags_bright_regions_without_a_reference() {
        let mut det = detector(DetectMode::StaticLuma, 150.0);
        let mut frame = Frame::solid(4, 3, [16, 16, 16]);
        frame.put_rgb(3, 0, [220, 210, 60]);
        let mask = det.detect(&frame).unwrap();
        assert_eq!(mask.active_points(), alloc::vec![Point { x: 3, y: 0 }]);
        // same frame again: static mode is memoryless
        let mask = det.detect(&frame).unwrap();
        assert_eq!(mask.active_count(), 1);
    }

    #[test]
    fn temporal_mode_tracks_a_moving_pixel() {
        let mut det = detector(DetectMode::TemporalDiff, 120.0);
        let mut first = Frame::zero(6, 2);
        first.put_rgb(1, 1, [255, 255, 255]);
        det.detect(&first).unwrap();

        let mut second = Frame::zero(6, 2);
        second.put_rgb(4, 1, [255, 255, 255]);
        let mask = det.detect(&second).unwrap();
        // old position and new position both differ from the reference
        assert!(mask.is_active(1, 1));
        assert!(mask.is_active(4, 1));
        assert_eq!(mask.active_count(), 2);
    }

    #[test]
    fn shape_change_mid_run_is_fatal() {
        let mut det = detector(DetectMode::TemporalDiff, 120.0);
        det.detect(&Frame::zero(8, 6)).unwrap();
        let err = det.detect(&Frame::zero(4, 6)).unwrap_err();
        assert!(matches!(
            err,
            TrackError::ShapeMismatch {
                expected_width: 8,
                width: 4,
                ..
            }
        ));
    }

    #[test]
    fn reset_drops_the_reference() {
        let mut det = detector(DetectMode::TemporalDiff, 120.0);
        let frame = Frame::solid(4, 4, [200, 200, 200]);
        det.detect(&frame).unwrap();
        det.reset();
        // after reset the same frame is compared against zero again
        let mask = det.detect(&frame).unwrap();
        assert_eq!(mask.active_count(), 16);
    }

    #[test]
    fn zero_area_frame_yields_an_empty_point_set() {
        let mut det = detector(DetectMode::TemporalDiff, 120.0);
        let mask = det.detect(&Frame::zero(0, 240)).unwrap();
        assert!(mask.active_points().is_empty());
        assert_eq!(mask.active_count(), 0);
    }

    #[test]
    fn bgr_frames_detect_the_same_after_normalization() {
        let raw_bgr = [60u8, 210, 220, 16, 16, 16];
        let frame = Frame::from_raw(2, 1, ChannelOrder::Bgr, &raw_bgr).unwrap();
        let mut det = detector(DetectMode::StaticLuma, 150.0);
        let mask = det.detect(&frame).unwrap();
        assert!(mask.is_active(0, 0));
        assert!(!mask.is_active(1, 0));
    }

    #[test]
    fn weighted_magnitude_matches_the_luma_weights() {
        // 0.299 + 0.587 + 0.114 = 1.0, so a uniform triple maps to itself
        let sq = weighted_magnitude_sq(255, 255, 255);
        assert!((sq.sqrt() - 255.0).abs() < 1e-9);
        let sq = weighted_magnitude_sq(100, 100, 100);
        assert!((sq.sqrt() - 100.0).abs() < 1e-9);
    }
}
