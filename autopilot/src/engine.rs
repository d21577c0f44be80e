use std::fmt;

use motion_tracker_core::frame::ChannelOrder;
use motion_tracker_core::steer::ActionLayout;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenFormat {
    pub width: u32,
    pub height: u32,
    pub order: ChannelOrder,
}

/// Pull-style per-tick state delivered by the engine: the tic counter, the
/// packed pixel buffer in the engine's native channel order, and the scalar
/// game variable vector.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineTick {
    pub tic: u32,
    pub screen_buffer: Vec<u8>,
    pub game_variables: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The engine failed to deliver a frame or accept an action. Fatal for
    /// the episode; there is no retry policy.
    Unavailable { reason: String },
    /// State was requested or an action submitted outside a running episode.
    EpisodeNotActive,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "engine unavailable: {reason}"),
            Self::EpisodeNotActive => write!(f, "no episode is active"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Seam to the external game engine. One implementor drives one process;
/// every call blocks until the engine has served it.
pub trait GameEngine {
    fn screen_format(&self) -> ScreenFormat;
    fn action_layout(&self) -> ActionLayout;
    fn new_episode(&mut self) -> Result<(), EngineError>;
    fn episode_finished(&self) -> bool;
    fn tick_state(&mut self) -> Result<EngineTick, EngineError>;
    /// Submits a 0/1 action vector aligned with `action_layout` and returns
    /// the reward for this tick.
    fn apply_action(&mut self, action: &[f64]) -> Result<f64, EngineError>;
    fn total_reward(&self) -> f64;
}
