use motion_tracker_core::detect::DetectMode;
use motion_tracker_core::session::TrackerConfig;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct TrackerPilotConfig {
    pub id: &'static str,
    pub description: &'static str,
    pub mode: DetectMode,
    pub diff_threshold: f64,
    pub link_distance: f64,
    pub center_margin: f64,
    pub hud_cutoff: f64,
    pub truncate_centroids: bool,
}

impl TrackerPilotConfig {
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            mode: self.mode,
            diff_threshold: self.diff_threshold,
            link_distance: self.link_distance,
            center_margin: self.center_margin,
            hud_cutoff: self.hud_cutoff,
            truncate_centroids: self.truncate_centroids,
        }
    }
}

pub fn tracker_pilot_configs() -> &'static [TrackerPilotConfig] {
    &[
        TrackerPilotConfig {
            id: "motion-wide",
            description: "Temporal-difference tracker with coarse clustering and a wide fire band.",
            mode: DetectMode::TemporalDiff,
            diff_threshold: 120.0,
            link_distance: 30.0,
            center_margin: 25.0,
            hud_cutoff: 0.56,
            truncate_centroids: false,
        },
        TrackerPilotConfig {
            id: "motion-fine",
            description: "Temporal-difference tracker with tight clustering, a narrow fire band, and truncating centroids.",
            mode: DetectMode::TemporalDiff,
            diff_threshold: 150.0,
            link_distance: 3.0,
            center_margin: 10.0,
            hud_cutoff: 0.56,
            truncate_centroids: true,
        },
        TrackerPilotConfig {
            id: "bright-static",
            description: "Static luma tracker that chases bright regions instead of motion.",
            mode: DetectMode::StaticLuma,
            diff_threshold: 150.0,
            link_distance: 30.0,
            center_margin: 25.0,
            hud_cutoff: 0.56,
            truncate_centroids: false,
        },
    ]
}
