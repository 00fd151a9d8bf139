//! Operations designed for submission to a remote task executor.
//!
//! The executor itself is external to this crate: it is responsible for
//! scheduling, cancellation, and result delivery. Functions here are plain
//! synchronous computations.
use crate::Prng;
use ndarray::{ArrayD, IxDyn};
use rand::Rng;
use rand_distr::StandardNormal;

/// Sample an array of independent standard normal draws.
///
/// Results are deterministic only up to the state of the given random stream.
pub fn normal(shape: &[usize], rng: &mut Prng) -> ArrayD<f64> {
    ArrayD::from_shape_simple_fn(IxDyn(shape), || rng.sample(StandardNormal))
}
