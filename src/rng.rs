//! Reproducible random number generation
use rand::SeedableRng;

/// Pseudorandom number generator used by this crate.
pub type Prng = rand_chacha::ChaCha8Rng;

/// Random state for an experiment, split into independent streams.
///
/// Seeding is an explicit construction rather than mutation of global state:
/// two values built with the same seeds yield identical draw sequences from
/// every stream.
#[derive(Debug, Clone)]
pub struct RngState {
    /// General-purpose draws: environment dynamics and tie-breaking.
    pub general: Prng,
    /// Array sampling, including [`crate::remote::normal`].
    pub array: Prng,
    /// Learner exploration, initialization, and updates.
    pub learner: Prng,
}

impl RngState {
    /// Deterministically seed all three streams.
    pub fn seed(general_seed: u64, array_seed: u64, learner_seed: u64) -> Self {
        Self {
            general: Prng::seed_from_u64(general_seed),
            array: Prng::seed_from_u64(array_seed),
            learner: Prng::seed_from_u64(learner_seed),
        }
    }

    /// Derive the three stream seeds from a single base seed.
    pub fn from_base_seed(seed: u64) -> Self {
        Self::seed(seed, seed.wrapping_add(1), seed.wrapping_add(2))
    }
}

impl Default for RngState {
    fn default() -> Self {
        Self::seed(0, 0, 0)
    }
}
