use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::blobs::{self, Blob};
use crate::detect::{ChangeDetector, DetectMode};
use crate::error::TrackError;
use crate::frame::Frame;
use crate::steer::{self, Steering};

pub const DEFAULT_DIFF_THRESHOLD: f64 = 120.0;
pub const DEFAULT_LINK_DISTANCE: f64 = 30.0;
pub const DEFAULT_CENTER_MARGIN: f64 = 25.0;
pub const DEFAULT_HUD_CUTOFF: f64 = 0.56;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub mode: DetectMode,
    pub diff_threshold: f64,
    pub link_distance: f64,
    pub center_margin: f64,
    pub hud_cutoff: f64,
    pub truncate_centroids: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            mode: DetectMode::TemporalDiff,
            diff_threshold: DEFAULT_DIFF_THRESHOLD,
            link_distance: DEFAULT_LINK_DISTANCE,
            center_margin: DEFAULT_CENTER_MARGIN,
            hud_cutoff: DEFAULT_HUD_CUTOFF,
            truncate_centroids: false,
        }
    }
}

/// What one tick of the pipeline saw and decided.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub active_pixels: u32,
    pub blobs: Vec<Blob>,
    pub target: Option<Blob>,
    pub steering: Steering,
}

/// Per-run pipeline state. Owns the detector and with it the reference
/// frame; one session drives exactly one run.
#[derive(Clone, Debug)]
pub struct MotionSession {
    config: TrackerConfig,
    detector: ChangeDetector,
}

impl MotionSession {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            detector: ChangeDetector::new(config.mode, config.diff_threshold),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Call at episode boundaries so the first tick of the new episode is
    /// compared against the zero baseline, not the old episode's last frame.
    pub fn begin_episode(&mut self) {
        self.detector.reset();
    }

    /// Full per-tick pass: activity mask, clustering, HUD filter, steering.
    /// The target is the first surviving blob in scan order; with no
    /// survivors the steering falls back to fire.
    pub fn observe(&mut self, frame: &Frame) -> Result<Observation, TrackError> {
        let mask = self.detector.detect(frame)?;
        let points = mask.active_points();
        let blobs = blobs::extract_blobs(
            &points,
            self.config.link_distance,
            self.config.truncate_centroids,
        );
        let blobs = blobs::retain_above_hud(blobs, frame.height(), self.config.hud_cutoff);
        let target = blobs.first().copied();
        let steering =
            steer::select_steering(target.as_ref(), frame.width(), self.config.center_margin);
        Ok(Observation {
            active_pixels: points.len() as u32,
            blobs,
            target,
            steering,
        })
    }
}
