#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod blobs;
pub mod detect;
pub mod digest;
pub mod error;
pub mod frame;
pub mod rng;
pub mod session;
pub mod steer;

pub use error::TrackError;
pub use frame::{ChannelOrder, Frame};
pub use session::{MotionSession, Observation, TrackerConfig};
pub use steer::Steering;
