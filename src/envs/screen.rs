//! Minimal Atari-style screen environment
use super::{Env, EnvFamily, EnvStep, Observation};
use crate::Prng;
use ndarray::Array3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration for the [`PixelPaddle`] environment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPaddleConfig {
    /// Screen height in pixels.
    pub screen_height: usize,
    /// Screen width in pixels.
    pub screen_width: usize,
    /// The paddle extends this many pixels to each side of its center.
    pub paddle_half_width: usize,
    /// Number of rows the ball falls per step.
    pub ball_speed: usize,
    /// Episodes are cut off after this many steps.
    pub max_episode_steps: u64,
}

impl Default for PixelPaddleConfig {
    fn default() -> Self {
        Self {
            // Atari 2600 screen dimensions.
            screen_height: 210,
            screen_width: 160,
            paddle_half_width: 8,
            ball_speed: 5,
            max_episode_steps: 1000,
        }
    }
}

/// A ball-and-paddle game rendered as raw color screen frames.
///
/// Balls fall from the top of the screen at random columns; the paddle at the
/// bottom moves left, right, or stays. Catching a ball yields reward 1 and
/// drops a new one; missing ends the episode.
///
/// Observations are `[height, width, 3]` RGB frames with values in `[0, 1]`,
/// the format an Atari-style emulator produces, so this environment reports
/// the [`Atari`](EnvFamily::Atari) family and exercises the same
/// preprocessing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPaddle {
    config: PixelPaddleConfig,
    ball_row: usize,
    ball_col: usize,
    paddle_col: usize,
    steps: u64,
}

impl PixelPaddle {
    pub const fn new(config: PixelPaddleConfig) -> Self {
        Self {
            config,
            ball_row: 0,
            ball_col: 0,
            paddle_col: 0,
            steps: 0,
        }
    }

    fn spawn_ball(&mut self, rng: &mut Prng) {
        self.ball_row = 0;
        self.ball_col = rng.gen_range(0..self.config.screen_width);
    }

    fn paddle_row(&self) -> usize {
        self.config.screen_height - 1
    }

    fn render(&self) -> Observation {
        let c = &self.config;
        let mut frame = Array3::<f32>::zeros((c.screen_height, c.screen_width, 3));
        // White ball, 2x2 pixels.
        for row in self.ball_row..(self.ball_row + 2).min(c.screen_height) {
            for col in self.ball_col..(self.ball_col + 2).min(c.screen_width) {
                frame[[row, col, 0]] = 1.0;
                frame[[row, col, 1]] = 1.0;
                frame[[row, col, 2]] = 1.0;
            }
        }
        // Red paddle on the bottom row.
        let lo = self.paddle_col.saturating_sub(c.paddle_half_width);
        let hi = (self.paddle_col + c.paddle_half_width + 1).min(c.screen_width);
        for col in lo..hi {
            frame[[self.paddle_row(), col, 0]] = 1.0;
        }
        frame.into_dyn()
    }

    fn caught(&self) -> bool {
        self.ball_col.abs_diff(self.paddle_col) <= self.config.paddle_half_width
    }
}

impl Default for PixelPaddle {
    fn default() -> Self {
        Self::new(PixelPaddleConfig::default())
    }
}

impl Env for PixelPaddle {
    fn family(&self) -> EnvFamily {
        EnvFamily::Atari
    }

    fn observation_shape(&self) -> Vec<usize> {
        vec![self.config.screen_height, self.config.screen_width, 3]
    }

    fn num_actions(&self) -> usize {
        3 // stay, left, right
    }

    fn reset(&mut self, rng: &mut Prng) -> Observation {
        self.paddle_col = self.config.screen_width / 2;
        self.steps = 0;
        self.spawn_ball(rng);
        self.render()
    }

    fn step(&mut self, action: usize, rng: &mut Prng) -> EnvStep {
        match action {
            0 => {}
            1 => self.paddle_col = self.paddle_col.saturating_sub(2),
            2 => self.paddle_col = (self.paddle_col + 2).min(self.config.screen_width - 1),
            _ => panic!("invalid action {action}"),
        }
        self.ball_row += self.config.ball_speed;
        self.steps += 1;

        let mut reward = 0.0;
        let mut episode_done = self.steps >= self.config.max_episode_steps;
        if self.ball_row >= self.paddle_row() {
            if self.caught() {
                reward = 1.0;
                self.spawn_ball(rng);
            } else {
                episode_done = true;
            }
        }
        EnvStep {
            observation: self.render(),
            reward,
            episode_done,
        }
    }
}
