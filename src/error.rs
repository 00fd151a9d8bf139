//! Experiment orchestration errors
use crate::envs::BuildEnvError;
use thiserror::Error;

/// Error raised while orchestrating an experiment.
///
/// `Manager` is the specialization of the general `Orchestration` case for
/// failures originating in experiment management and coordination logic.
/// Matching on the type catches both.
#[derive(Error, Debug)]
pub enum ExperimentError {
    /// General experiment orchestration failure.
    #[error("{0}")]
    Orchestration(String),
    /// Failure in experiment management / coordination logic.
    #[error("experiment manager: {0}")]
    Manager(String),
    #[error("error building environment")]
    BuildEnv(#[from] BuildEnvError),
    #[error("file error")]
    Io(#[from] std::io::Error),
    #[error("(de)serialization error")]
    Encode(#[from] serde_json::Error),
}
