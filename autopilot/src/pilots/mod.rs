//! Pilot roster: policies mapping per-tick engine state to action vectors.

mod configs;
mod motion;
mod random;
mod roster;

pub use configs::{tracker_pilot_configs, TrackerPilotConfig};
pub use motion::MotionPilot;
pub use random::{RandomPilot, RANDOM_PILOT_ID};
pub use roster::{
    create_pilot, describe_pilots, pilot_fingerprint, pilot_ids, pilot_manifest_entries,
    PilotManifestEntry,
};

use motion_tracker_core::steer::ActionLayout;
use motion_tracker_core::TrackError;

use crate::engine::{EngineTick, ScreenFormat};

pub trait Pilot {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Called before every episode. Seeds internal randomness and drops
    /// cross-episode state such as a detector's reference frame.
    fn reset(&mut self, seed: u32);
    fn next_action(
        &mut self,
        format: &ScreenFormat,
        layout: &ActionLayout,
        tick: &EngineTick,
    ) -> Result<Vec<f64>, TrackError>;
}
