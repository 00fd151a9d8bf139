//! Cart-pole balancing environment
use super::{Env, EnvStep, Observation};
use crate::Prng;
use ndarray::Array1;
use rand::distributions::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Configuration for the [`CartPole`] environment.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartPoleConfig {
    /// Gravitational acceleration (m/s^2).
    pub gravity: f64,
    /// Mass of the cart (kg).
    pub cart_mass: f64,
    /// Mass of the pole (kg).
    pub pole_mass: f64,
    /// Half the length of the pole (m).
    pub pole_half_length: f64,
    /// Magnitude of the force applied by an action (N).
    pub action_force: f64,
    /// Simulation time step (s).
    pub time_step: f64,
    /// Cart positions beyond `[-max_pos, max_pos]` end the episode.
    pub max_pos: f64,
    /// Pole angles beyond `[-max_angle, max_angle]` radians end the episode.
    pub max_angle: f64,
    /// Episodes are cut off after this many steps.
    pub max_episode_steps: u64,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            cart_mass: 1.0,
            pole_mass: 0.1,
            pole_half_length: 0.5,
            action_force: 10.0,
            time_step: 0.02,
            max_pos: 2.4,
            max_angle: 12.0 * PI / 180.0,
            max_episode_steps: 500,
        }
    }
}

/// Cart-pole balancing environment.
///
/// A cart on a track with a pole attached by a hinge. The goal is to keep the
/// pole upright by pushing the cart left or right; each step in which the pole
/// has not fallen yields reward 1. Dynamics and default constants follow the
/// [OpenAI Gym CartPole environment][gym_cartpole].
///
/// Observations are `[cart_position, cart_velocity, pole_angle,
/// pole_angular_velocity]`.
///
/// [gym_cartpole]: https://github.com/openai/gym/blob/master/gym/envs/classic_control/cartpole.py
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartPole {
    config: CartPoleConfig,
    /// `[x, x_dot, theta, theta_dot]`
    state: [f64; 4],
    steps: u64,
}

impl CartPole {
    pub const fn new(config: CartPoleConfig) -> Self {
        Self {
            config,
            state: [0.0; 4],
            steps: 0,
        }
    }

    fn observation(&self) -> Observation {
        Array1::from_iter(self.state.iter().map(|&v| v as f32)).into_dyn()
    }

    /// Advance the physical state by one time step under an applied force.
    fn advance(&mut self, force: f64) {
        let c = &self.config;
        let [x, x_dot, theta, theta_dot] = self.state;
        let total_mass = c.cart_mass + c.pole_mass;
        let pole_mass_length = c.pole_mass * c.pole_half_length;

        let cos_theta = theta.cos();
        let sin_theta = theta.sin();
        let temp = (force + pole_mass_length * theta_dot * theta_dot * sin_theta) / total_mass;
        let theta_acc = (c.gravity * sin_theta - cos_theta * temp)
            / (c.pole_half_length
                * (4.0 / 3.0 - c.pole_mass * cos_theta * cos_theta / total_mass));
        let x_acc = temp - pole_mass_length * theta_acc * cos_theta / total_mass;

        // Semi-implicit Euler integration, matching gym.
        self.state = [
            x + c.time_step * x_dot,
            x_dot + c.time_step * x_acc,
            theta + c.time_step * theta_dot,
            theta_dot + c.time_step * theta_acc,
        ];
    }

    fn failed(&self) -> bool {
        self.state[0].abs() > self.config.max_pos || self.state[2].abs() > self.config.max_angle
    }
}

impl Default for CartPole {
    fn default() -> Self {
        Self::new(CartPoleConfig::default())
    }
}

impl Env for CartPole {
    fn observation_shape(&self) -> Vec<usize> {
        vec![4]
    }

    fn num_actions(&self) -> usize {
        2
    }

    fn reset(&mut self, rng: &mut Prng) -> Observation {
        let dist = Uniform::new_inclusive(-0.05, 0.05);
        self.state = [
            dist.sample(rng),
            dist.sample(rng),
            dist.sample(rng),
            dist.sample(rng),
        ];
        self.steps = 0;
        self.observation()
    }

    fn step(&mut self, action: usize, _: &mut Prng) -> EnvStep {
        let force = match action {
            0 => -self.config.action_force,
            1 => self.config.action_force,
            _ => panic!("invalid action {action}"),
        };
        self.advance(force);
        self.steps += 1;
        EnvStep {
            observation: self.observation(),
            reward: 1.0,
            episode_done: self.failed() || self.steps >= self.config.max_episode_steps,
        }
    }
}
