//! Centroid-chasing tracker pilot. Runs the full vision pipeline on every
//! tick and steers until the target blob sits inside the fire band.

use motion_tracker_core::frame::Frame;
use motion_tracker_core::session::MotionSession;
use motion_tracker_core::steer::ActionLayout;
use motion_tracker_core::TrackError;
use tracing::debug;

use crate::engine::{EngineTick, ScreenFormat};
use crate::pilots::{Pilot, TrackerPilotConfig};

pub struct MotionPilot {
    config: TrackerPilotConfig,
    session: MotionSession,
}

impl MotionPilot {
    pub fn new(config: TrackerPilotConfig) -> Self {
        Self {
            session: MotionSession::new(config.tracker_config()),
            config,
        }
    }
}

impl Pilot for MotionPilot {
    fn id(&self) -> &'static str {
        self.config.id
    }

    fn description(&self) -> &'static str {
        self.config.description
    }

    fn reset(&mut self, _seed: u32) {
        self.session.begin_episode();
    }

    fn next_action(
        &mut self,
        format: &ScreenFormat,
        layout: &ActionLayout,
        tick: &EngineTick,
    ) -> Result<Vec<f64>, TrackError> {
        let frame = Frame::from_raw(format.width, format.height, format.order, &tick.screen_buffer)?;
        let observation = self.session.observe(&frame)?;
        debug!(
            tic = tick.tic,
            active = observation.active_pixels,
            blobs = observation.blobs.len(),
            steering = ?observation.steering,
            "tracker tick"
        );
        Ok(layout.encode(observation.steering))
    }
}
