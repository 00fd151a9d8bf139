//! Deepmind-style Atari frame preprocessing
use super::{Wrap, Wrapped};
use crate::envs::{Env, EnvFamily, EnvStep, Observation};
use crate::Prng;
use ndarray::{s, Array2, Axis, Ix2, Ix3};
use std::collections::VecDeque;

/// Apply the deepmind-style Atari preprocessing pipeline.
///
/// Frame-skip with two-frame max-pooling, grayscale conversion,
/// nearest-neighbor resize to `dim` x `dim`, and a four-frame stack.
/// The output observation shape is `[dim, dim, 4]`.
pub fn wrap_deepmind(env: Box<dyn Env>, dim: usize) -> Box<dyn Env> {
    Box::new(
        env.wrap(FrameSkip::default())
            .wrap(Grayscale)
            .wrap(Resize::new(dim))
            .wrap(FrameStack::new(4)),
    )
}

/// Environment wrapper that repeats each action over several frames.
///
/// Rewards over the skipped frames are summed and the observation is the
/// element-wise maximum of the last two frames, removing emulator flicker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameSkip {
    /// Number of frames each action is repeated for.
    pub skip: u32,
}

impl FrameSkip {
    pub const fn new(skip: u32) -> Self {
        assert!(skip >= 1);
        Self { skip }
    }
}

impl Default for FrameSkip {
    fn default() -> Self {
        Self { skip: 4 }
    }
}

impl<E: Env> Env for Wrapped<E, FrameSkip> {
    fn family(&self) -> EnvFamily {
        self.inner.family()
    }

    fn observation_shape(&self) -> Vec<usize> {
        self.inner.observation_shape()
    }

    fn num_actions(&self) -> usize {
        self.inner.num_actions()
    }

    fn reset(&mut self, rng: &mut Prng) -> Observation {
        self.inner.reset(rng)
    }

    fn step(&mut self, action: usize, rng: &mut Prng) -> EnvStep {
        let mut reward = 0.0;
        let mut episode_done = false;
        let mut previous: Option<Observation> = None;
        let mut last: Option<Observation> = None;
        for _ in 0..self.wrapper.skip {
            let step = self.inner.step(action, rng);
            reward += step.reward;
            previous = last.replace(step.observation);
            if step.episode_done {
                episode_done = true;
                break;
            }
        }
        let mut observation = last.expect("skip is at least 1");
        if let Some(previous) = previous {
            observation.zip_mut_with(&previous, |a, &b| *a = a.max(b));
        }
        EnvStep {
            observation,
            reward,
            episode_done,
        }
    }
}

/// Environment wrapper that converts `[h, w, 3]` color frames to `[h, w]`
/// grayscale using ITU-R 601 luma weights.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grayscale;

fn to_grayscale(observation: &Observation) -> Observation {
    let frame = observation
        .view()
        .into_dimensionality::<Ix3>()
        .expect("grayscale input must be a [h, w, c] frame");
    assert_eq!(frame.shape()[2], 3, "expected 3 color channels");
    let weights = [0.299_f32, 0.587, 0.114];
    Array2::from_shape_fn((frame.shape()[0], frame.shape()[1]), |(i, j)| {
        frame
            .slice(s![i, j, ..])
            .iter()
            .zip(&weights)
            .map(|(v, w)| v * w)
            .sum()
    })
    .into_dyn()
}

impl<E: Env> Env for Wrapped<E, Grayscale> {
    fn family(&self) -> EnvFamily {
        self.inner.family()
    }

    fn observation_shape(&self) -> Vec<usize> {
        let shape = self.inner.observation_shape();
        assert_eq!(shape.len(), 3);
        vec![shape[0], shape[1]]
    }

    fn num_actions(&self) -> usize {
        self.inner.num_actions()
    }

    fn reset(&mut self, rng: &mut Prng) -> Observation {
        to_grayscale(&self.inner.reset(rng))
    }

    fn step(&mut self, action: usize, rng: &mut Prng) -> EnvStep {
        let EnvStep {
            observation,
            reward,
            episode_done,
        } = self.inner.step(action, rng);
        EnvStep {
            observation: to_grayscale(&observation),
            reward,
            episode_done,
        }
    }
}

/// Environment wrapper that resizes `[h, w]` frames to `[dim, dim]` by
/// nearest-neighbor sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resize {
    /// Output frame edge length.
    pub dim: usize,
}

impl Resize {
    pub const fn new(dim: usize) -> Self {
        assert!(dim >= 1);
        Self { dim }
    }
}

fn resize(observation: &Observation, dim: usize) -> Observation {
    let frame = observation
        .view()
        .into_dimensionality::<Ix2>()
        .expect("resize input must be a [h, w] frame");
    let (height, width) = frame.dim();
    Array2::from_shape_fn((dim, dim), |(i, j)| frame[[i * height / dim, j * width / dim]])
        .into_dyn()
}

impl<E: Env> Env for Wrapped<E, Resize> {
    fn family(&self) -> EnvFamily {
        self.inner.family()
    }

    fn observation_shape(&self) -> Vec<usize> {
        vec![self.wrapper.dim, self.wrapper.dim]
    }

    fn num_actions(&self) -> usize {
        self.inner.num_actions()
    }

    fn reset(&mut self, rng: &mut Prng) -> Observation {
        resize(&self.inner.reset(rng), self.wrapper.dim)
    }

    fn step(&mut self, action: usize, rng: &mut Prng) -> EnvStep {
        let EnvStep {
            observation,
            reward,
            episode_done,
        } = self.inner.step(action, rng);
        EnvStep {
            observation: resize(&observation, self.wrapper.dim),
            reward,
            episode_done,
        }
    }
}

/// Environment wrapper that stacks the most recent frames along a new
/// trailing axis.
///
/// On reset the initial frame is repeated to fill the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStack {
    num_frames: usize,
    frames: VecDeque<Observation>,
}

impl FrameStack {
    pub fn new(num_frames: usize) -> Self {
        assert!(num_frames >= 1);
        Self {
            num_frames,
            frames: VecDeque::with_capacity(num_frames),
        }
    }

    fn push(&mut self, frame: Observation) {
        if self.frames.len() == self.num_frames {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    fn stacked(&self) -> Observation {
        let views: Vec<_> = self.frames.iter().map(|frame| frame.view()).collect();
        let axis = Axis(views[0].ndim());
        ndarray::stack(axis, &views).expect("stacked frames share a shape")
    }
}

impl<E: Env> Env for Wrapped<E, FrameStack> {
    fn family(&self) -> EnvFamily {
        self.inner.family()
    }

    fn observation_shape(&self) -> Vec<usize> {
        let mut shape = self.inner.observation_shape();
        shape.push(self.wrapper.num_frames);
        shape
    }

    fn num_actions(&self) -> usize {
        self.inner.num_actions()
    }

    fn reset(&mut self, rng: &mut Prng) -> Observation {
        let frame = self.inner.reset(rng);
        self.wrapper.frames.clear();
        for _ in 0..self.wrapper.num_frames {
            self.wrapper.push(frame.clone());
        }
        self.wrapper.stacked()
    }

    fn step(&mut self, action: usize, rng: &mut Prng) -> EnvStep {
        let EnvStep {
            observation,
            reward,
            episode_done,
        } = self.inner.step(action, rng);
        self.wrapper.push(observation);
        EnvStep {
            observation: self.wrapper.stacked(),
            reward,
            episode_done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envs::{testing, PixelPaddle};
    use ndarray::{Array1, Array3};
    use rand::SeedableRng;

    #[test]
    fn run_deepmind_pipeline() {
        let mut env = wrap_deepmind(Box::new(PixelPaddle::default()), 84);
        testing::run_random_rollout(env.as_mut(), 50, 11);
    }

    #[test]
    fn deepmind_output_shape() {
        let mut rng = Prng::seed_from_u64(0);
        let mut env = wrap_deepmind(Box::new(PixelPaddle::default()), 84);
        assert_eq!(env.observation_shape(), vec![84, 84, 4]);
        assert_eq!(env.reset(&mut rng).shape(), &[84, 84, 4]);
        assert_eq!(env.step(0, &mut rng).observation.shape(), &[84, 84, 4]);
    }

    #[test]
    fn grayscale_applies_luma_weights() {
        let mut frame = Array3::<f32>::zeros((2, 2, 3));
        frame[[0, 0, 0]] = 1.0; // pure red
        frame[[1, 1, 1]] = 1.0; // pure green
        let gray = to_grayscale(&frame.into_dyn());
        assert_eq!(gray.shape(), &[2, 2]);
        assert!((gray[[0, 0]] - 0.299).abs() < 1e-6);
        assert!((gray[[1, 1]] - 0.587).abs() < 1e-6);
        assert_eq!(gray[[0, 1]], 0.0);
    }

    #[test]
    fn resize_downsamples() {
        let frame = Array2::from_shape_fn((4, 4), |(i, j)| (i * 4 + j) as f32).into_dyn();
        let small = resize(&frame, 2);
        assert_eq!(small.shape(), &[2, 2]);
        // Nearest-neighbor picks the top-left source pixel of each block.
        assert_eq!(small[[0, 0]], 0.0);
        assert_eq!(small[[0, 1]], 2.0);
        assert_eq!(small[[1, 0]], 8.0);
        assert_eq!(small[[1, 1]], 10.0);
    }

    /// Environment emitting a counter so frame arithmetic is visible.
    struct Counter {
        value: f32,
    }

    impl Env for Counter {
        fn observation_shape(&self) -> Vec<usize> {
            vec![1]
        }
        fn num_actions(&self) -> usize {
            1
        }
        fn reset(&mut self, _: &mut Prng) -> Observation {
            self.value = 0.0;
            Array1::from(vec![0.0_f32]).into_dyn()
        }
        fn step(&mut self, _: usize, _: &mut Prng) -> EnvStep {
            self.value += 1.0;
            EnvStep {
                observation: Array1::from(vec![self.value]).into_dyn(),
                reward: 1.0,
                episode_done: false,
            }
        }
    }

    #[test]
    fn frame_skip_sums_rewards_and_max_pools() {
        let mut rng = Prng::seed_from_u64(0);
        let mut env = Counter { value: 0.0 }.wrap(FrameSkip::new(4));
        env.reset(&mut rng);
        let step = env.step(0, &mut rng);
        // Four inner steps, each worth reward 1.
        assert_eq!(step.reward, 4.0);
        // Max of the last two frames (3.0 and 4.0).
        assert_eq!(step.observation[[0]], 4.0);
    }

    #[test]
    fn frame_stack_repeats_the_initial_frame() {
        let mut rng = Prng::seed_from_u64(0);
        let mut env = Counter { value: 0.0 }.wrap(FrameStack::new(3));
        assert_eq!(env.observation_shape(), vec![1, 3]);
        let observation = env.reset(&mut rng);
        assert_eq!(observation.shape(), &[1, 3]);
        assert!(observation.iter().all(|&v| v == 0.0));

        let step = env.step(0, &mut rng);
        let stacked: Vec<f32> = step.observation.iter().copied().collect();
        assert_eq!(stacked, vec![0.0, 0.0, 1.0]);
    }
}
