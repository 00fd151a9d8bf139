//! Tabular Q-learning over discretized observations
use super::Transition;
use crate::envs::Observation;
use crate::Prng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write;

/// Epsilon-greedy tabular Q-learning agent.
///
/// Observations are discretized element-wise into fixed-width bins and the
/// resulting cell indexes the Q table. Works on low-dimensional observations;
/// the table grows with the number of visited cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularQAgent {
    num_actions: usize,
    /// Step size of the Q value update.
    pub learning_rate: f64,
    /// Discount applied to bootstrapped future value.
    pub discount_factor: f64,
    /// Probability of taking a uniformly random action.
    pub exploration_rate: f64,
    /// Width of each discretization bin.
    pub bin_width: f32,
    q_table: HashMap<String, Vec<f64>>,
}

impl TabularQAgent {
    pub fn new(num_actions: usize) -> Self {
        assert!(num_actions > 0, "the action space must be non-empty");
        Self {
            num_actions,
            learning_rate: 0.1,
            discount_factor: 0.99,
            exploration_rate: 0.1,
            bin_width: 0.1,
            q_table: HashMap::new(),
        }
    }

    /// Number of distinct observation cells visited so far.
    pub fn num_cells(&self) -> usize {
        self.q_table.len()
    }

    /// Q-table key for an observation: one clamped bin index per element.
    fn key(&self, observation: &Observation) -> String {
        let mut key = String::new();
        for &value in observation {
            let bin = ((value / self.bin_width).round() as i64).clamp(-1_000, 1_000);
            write!(key, "{bin},").expect("writing to a String is infallible");
        }
        key
    }

    pub fn act(&self, observation: &Observation, rng: &mut Prng) -> usize {
        if rng.gen::<f64>() < self.exploration_rate {
            return rng.gen_range(0..self.num_actions);
        }
        match self.q_table.get(&self.key(observation)) {
            Some(values) => argmax(values),
            None => rng.gen_range(0..self.num_actions),
        }
    }

    pub fn update(&mut self, transition: &Transition) {
        // Bootstrapped value of the successor; terminal states are worth 0,
        // as are unvisited cells.
        let next_value = transition
            .next_observation
            .as_ref()
            .and_then(|observation| self.q_table.get(&self.key(observation)))
            .map_or(0.0, |values| {
                values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            });
        let target = transition.reward + self.discount_factor * next_value;

        let key = self.key(&transition.observation);
        let values = self
            .q_table
            .entry(key)
            .or_insert_with(|| vec![0.0; self.num_actions]);
        let value = &mut values[transition.action];
        *value += self.learning_rate * (target - *value);
    }
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(index, _)| index)
        .expect("at least one action")
}
