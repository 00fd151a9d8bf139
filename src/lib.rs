//! A reinforcement learning experiment runner.
#![warn(clippy::cast_lossless)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::use_self)]
pub mod agents;
mod checkpoint;
pub mod cli;
pub mod envs;
mod error;
pub mod logging;
pub mod models;
pub mod remote;
mod rng;
pub mod rollout;
pub mod simulation;
pub mod train;
pub mod utils;

pub use checkpoint::Checkpoint;
pub use error::ExperimentError;
pub use rng::{Prng, RngState};
