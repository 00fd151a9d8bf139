//! Saving and restoring trained agents
use crate::agents::Agent;
use crate::error::ExperimentError;
use crate::models::ModelOptions;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// A trained agent together with the context needed to run it again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Name of the environment the agent was trained on.
    pub env: String,
    /// Preprocessor options used during training.
    pub model: ModelOptions,
    /// The trained agent.
    pub agent: Agent,
}

impl Checkpoint {
    pub fn new(env: &str, model: ModelOptions, agent: Agent) -> Self {
        Self {
            env: env.into(),
            model,
            agent,
        }
    }

    /// Serialize to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ExperimentError> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ExperimentError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
