//! Command-line options
use crate::models::ModelOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Train or run a reinforcement learning agent.
#[derive(Debug, Clone, PartialEq, Parser)]
#[clap(
    name = "rlrun",
    version,
    about = "Train or run a reinforcement learning agent",
    after_help = "EXAMPLES:\n    \
        rlrun train --run TabularQ --env CartPole-v0\n    \
        rlrun rollout /tmp/rlrun/checkpoint.json --run TabularQ"
)]
pub struct Options {
    #[clap(subcommand)]
    pub command: Option<Command>,
}

/// Experiment phase subcommands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Train an agent.
    Train(TrainOptions),
    /// Roll out a trained agent from a checkpoint.
    Rollout(RolloutOptions),
}

/// Options for the training phase.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct TrainOptions {
    /// Algorithm to train.
    #[clap(long = "run", value_name = "ALGORITHM")]
    pub run: String,

    /// Environment name.
    #[clap(long)]
    pub env: String,

    /// Base random seed for the experiment.
    #[clap(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of training epochs.
    #[clap(long, default_value_t = 10)]
    pub epochs: u64,

    /// Minimum number of environment steps per epoch.
    #[clap(long, default_value_t = 1000)]
    pub steps_per_epoch: u64,

    /// Use this registered preprocessor instead of the default pipeline.
    #[clap(long)]
    pub custom_preprocessor: Option<String>,

    /// Frame edge length for image preprocessing.
    #[clap(long)]
    pub dim: Option<usize>,

    /// Write the final checkpoint to this file.
    #[clap(long)]
    pub checkpoint_out: Option<PathBuf>,
}

impl TrainOptions {
    /// Preprocessor options derived from the flags.
    pub fn model_options(&self) -> ModelOptions {
        ModelOptions {
            custom_preprocessor: self.custom_preprocessor.clone(),
            dim: self.dim,
        }
    }
}

/// Options for the rollout phase.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct RolloutOptions {
    /// Checkpoint file to load.
    pub checkpoint: PathBuf,

    /// Algorithm that produced the checkpoint; checked against its contents.
    #[clap(long = "run", value_name = "ALGORITHM")]
    pub run: Option<String>,

    /// Environment name; defaults to the checkpoint's environment.
    #[clap(long)]
    pub env: Option<String>,

    /// Base random seed for the rollout.
    #[clap(long, default_value_t = 0)]
    pub seed: u64,

    /// Total number of environment steps to roll out.
    #[clap(long, default_value_t = 1000)]
    pub steps: u64,

    /// Write per-episode returns as JSON to this file.
    #[clap(long)]
    pub out: Option<PathBuf>,
}
