//! Test utilities for environments
use super::Env;
use crate::Prng;
use rand::{Rng, SeedableRng};

/// Run a random-action rollout, checking the observation contract.
///
/// Episodes are restarted whenever they end. Panics if the environment
/// produces observations that do not match `observation_shape`, non-finite
/// rewards, or has no actions.
pub fn run_random_rollout(env: &mut dyn Env, num_steps: u64, seed: u64) {
    let mut rng = Prng::seed_from_u64(seed);
    let shape = env.observation_shape();
    let num_actions = env.num_actions();
    assert!(num_actions > 0);

    let mut observation = env.reset(&mut rng);
    for _ in 0..num_steps {
        assert_eq!(observation.shape(), &shape[..]);
        let action = rng.gen_range(0..num_actions);
        let step = env.step(action, &mut rng);
        assert!(step.reward.is_finite());
        observation = if step.episode_done {
            env.reset(&mut rng)
        } else {
            step.observation
        };
    }
}
