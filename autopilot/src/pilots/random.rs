//! Uniform random baseline. No vision, no memory; every tick picks one of
//! the three actions at random. Useful as a benchmark floor.

use motion_tracker_core::rng::SeededRng;
use motion_tracker_core::steer::{ActionLayout, Steering};
use motion_tracker_core::TrackError;

use crate::engine::{EngineTick, ScreenFormat};
use crate::pilots::Pilot;

pub const RANDOM_PILOT_ID: &str = "random-walk";

pub struct RandomPilot {
    rng: SeededRng,
}

impl RandomPilot {
    pub fn new() -> Self {
        Self {
            rng: SeededRng::new(1),
        }
    }
}

impl Default for RandomPilot {
    fn default() -> Self {
        Self::new()
    }
}

impl Pilot for RandomPilot {
    fn id(&self) -> &'static str {
        RANDOM_PILOT_ID
    }

    fn description(&self) -> &'static str {
        "Uniform random action baseline with no vision."
    }

    fn reset(&mut self, seed: u32) {
        self.rng = SeededRng::new(seed);
    }

    fn next_action(
        &mut self,
        _format: &ScreenFormat,
        layout: &ActionLayout,
        _tick: &EngineTick,
    ) -> Result<Vec<f64>, TrackError> {
        let steering = match self.rng.next_int(3) {
            0 => Steering::Left,
            1 => Steering::Right,
            _ => Steering::Fire,
        };
        Ok(layout.encode(steering))
    }
}
