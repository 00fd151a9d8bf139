//! Agents that act in environments
mod random;
mod tabular;

pub use random::RandomAgent;
pub use tabular::TabularQAgent;

use crate::envs::{Env, Observation};
use crate::error::ExperimentError;
use crate::Prng;
use serde::{Deserialize, Serialize};

/// One environment transition, as seen by a learning agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Observation the action was selected from.
    pub observation: Observation,
    /// The selected action.
    pub action: usize,
    /// Reward for the transition.
    pub reward: f64,
    /// Observation of the successor state; `None` if the episode ended there.
    pub next_observation: Option<Observation>,
}

/// A learning agent, dispatched by algorithm name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm")]
pub enum Agent {
    /// Uniformly random actions; no learning.
    Random(RandomAgent),
    /// Epsilon-greedy tabular Q-learning over discretized observations.
    TabularQ(TabularQAgent),
}

impl Agent {
    /// Build the agent registered under `algorithm` for an environment.
    pub fn build(algorithm: &str, env: &dyn Env) -> Result<Self, ExperimentError> {
        match algorithm {
            "Random" => Ok(Self::Random(RandomAgent::new(env.num_actions()))),
            "TabularQ" => Ok(Self::TabularQ(TabularQAgent::new(env.num_actions()))),
            _ => Err(ExperimentError::Orchestration(format!(
                "unknown algorithm {algorithm:?}"
            ))),
        }
    }

    /// Name of the algorithm this agent implements.
    pub const fn algorithm(&self) -> &'static str {
        match self {
            Self::Random(_) => "Random",
            Self::TabularQ(_) => "TabularQ",
        }
    }

    /// Select an action for an observation.
    pub fn act(&mut self, observation: &Observation, rng: &mut Prng) -> usize {
        match self {
            Self::Random(agent) => agent.act(observation, rng),
            Self::TabularQ(agent) => agent.act(observation, rng),
        }
    }

    /// Learn from one transition.
    pub fn update(&mut self, transition: &Transition) {
        match self {
            Self::Random(_) => {}
            Self::TabularQ(agent) => agent.update(transition),
        }
    }
}
