//! An agent that always acts randomly
use crate::envs::Observation;
use crate::Prng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An agent that samples actions uniformly at random.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomAgent {
    num_actions: usize,
}

impl RandomAgent {
    pub fn new(num_actions: usize) -> Self {
        assert!(num_actions > 0, "the action space must be non-empty");
        Self { num_actions }
    }

    pub fn act(&self, _observation: &Observation, rng: &mut Prng) -> usize {
        rng.gen_range(0..self.num_actions)
    }
}
