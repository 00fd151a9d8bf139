//! Reinforcement learning environments
mod cartpole;
mod screen;
#[cfg(test)]
pub mod testing;
pub mod wrappers;

pub use cartpole::{CartPole, CartPoleConfig};
pub use screen::{PixelPaddle, PixelPaddleConfig};

use crate::Prng;
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Observation produced by an environment.
pub type Observation = ArrayD<f32>;

/// Family of simulator backing an environment.
///
/// Resolved once when the environment is constructed; wrappers forward the
/// family of the environment they wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvFamily {
    /// Atari-style emulators producing raw screen frames.
    Atari,
    /// Everything else.
    Generic,
}

/// Result of a single environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvStep {
    /// Observation of the new state.
    pub observation: Observation,
    /// Reward for the transition.
    pub reward: f64,
    /// Whether this step ends the episode.
    pub episode_done: bool,
}

/// A reinforcement learning environment with discrete actions.
///
/// Stateful, gym-style interface: `reset` starts a new episode and `step`
/// advances it by one action.
pub trait Env {
    /// Family of the backing simulator.
    fn family(&self) -> EnvFamily {
        EnvFamily::Generic
    }

    /// Shape of the observations produced by `reset` and `step`.
    fn observation_shape(&self) -> Vec<usize>;

    /// Number of discrete actions. Valid actions are `0..num_actions()`.
    fn num_actions(&self) -> usize;

    /// Start a new episode and return the initial observation.
    fn reset(&mut self, rng: &mut Prng) -> Observation;

    /// Advance the episode by one action.
    ///
    /// Must not be called after a step that set `episode_done` without an
    /// intervening `reset`.
    fn step(&mut self, action: usize, rng: &mut Prng) -> EnvStep;
}

impl<E: Env + ?Sized> Env for Box<E> {
    fn family(&self) -> EnvFamily {
        E::family(self)
    }
    fn observation_shape(&self) -> Vec<usize> {
        E::observation_shape(self)
    }
    fn num_actions(&self) -> usize {
        E::num_actions(self)
    }
    fn reset(&mut self, rng: &mut Prng) -> Observation {
        E::reset(self, rng)
    }
    fn step(&mut self, action: usize, rng: &mut Prng) -> EnvStep {
        E::step(self, action, rng)
    }
}

/// Error building an environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildEnvError {
    /// No environment is registered under the given name.
    #[error("unknown environment {0:?}")]
    UnknownEnv(String),
}

/// Build a registered environment from its name.
pub fn build_env(name: &str) -> Result<Box<dyn Env>, BuildEnvError> {
    match name {
        "CartPole-v0" => Ok(Box::new(CartPole::new(CartPoleConfig {
            max_episode_steps: 200,
            ..CartPoleConfig::default()
        }))),
        "CartPole-v1" => Ok(Box::new(CartPole::default())),
        "PixelPaddle-v0" => Ok(Box::new(PixelPaddle::default())),
        _ => Err(BuildEnvError::UnknownEnv(name.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_registered_envs() {
        assert_eq!(build_env("CartPole-v0").unwrap().family(), EnvFamily::Generic);
        assert_eq!(build_env("CartPole-v1").unwrap().family(), EnvFamily::Generic);
        assert_eq!(build_env("PixelPaddle-v0").unwrap().family(), EnvFamily::Atari);
    }

    #[test]
    fn build_unknown_env() {
        assert_eq!(
            build_env("Warehouse-v2").map(|_| ()).unwrap_err(),
            BuildEnvError::UnknownEnv("Warehouse-v2".into())
        );
    }
}
