pub mod benchmark;
pub mod engine;
pub mod pilots;
pub mod runner;
pub mod scripted;
pub mod util;
