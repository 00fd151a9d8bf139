//! Observation preprocessing wrappers
mod deepmind;

pub use deepmind::{wrap_deepmind, FrameSkip, FrameStack, Grayscale, Resize};

use super::{Env, EnvFamily};
use crate::error::ExperimentError;
use crate::models::{ModelCatalog, ModelOptions};

/// Default frame edge length for the Atari preprocessing pipeline.
pub const DEFAULT_ATARI_DIM: usize = 84;

/// Trait providing a `wrap` method for all sized types.
pub trait Wrap: Sized {
    /// Wrap in the given wrapper.
    #[inline]
    fn wrap<W>(self, wrapper: W) -> Wrapped<Self, W> {
        Wrapped {
            inner: self,
            wrapper,
        }
    }
}

impl<T> Wrap for T {}

/// A basic wrapped object.
///
/// Consists of the inner object and the wrapper state.
///
/// # Implementation
/// To implement a wrapper type, define `struct MyWrapper` and implement
/// `impl<E: Env> Env for Wrapped<E, MyWrapper>`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wrapped<T, W> {
    /// Wrapped object
    pub inner: T,
    /// The wrapper
    pub wrapper: W,
}

impl<T, W> Wrapped<T, W> {
    pub const fn new(inner: T, wrapper: W) -> Self {
        Self { inner, wrapper }
    }
}

/// Select the observation preprocessing pipeline for an environment.
///
/// Atari-family environments get the deepmind-style pipeline by default, with
/// the frame edge length taken from `options.dim` (default
/// [`DEFAULT_ATARI_DIM`]); setting `options.custom_preprocessor` opts out.
/// Every other case is resolved by the model catalog.
///
/// The returned environment has the same interface contract as the input and
/// produces already-transformed observations.
// TODO: move the Atari special case into `ModelCatalog::preprocessor`.
pub fn wrap_for_training(
    env: Box<dyn Env>,
    options: &ModelOptions,
    catalog: &ModelCatalog,
) -> Result<Box<dyn Env>, ExperimentError> {
    if env.family() == EnvFamily::Atari && options.custom_preprocessor.is_none() {
        let dim = options.dim.unwrap_or(DEFAULT_ATARI_DIM);
        return Ok(wrap_deepmind(env, dim));
    }
    catalog.preprocessor_as_wrapper(env, options)
}

#[cfg(test)]
mod tests {
    use super::super::{CartPole, PixelPaddle};
    use super::*;
    use rstest::rstest;

    fn atari_env() -> Box<dyn Env> {
        Box::new(PixelPaddle::default())
    }

    fn generic_env() -> Box<dyn Env> {
        Box::new(CartPole::default())
    }

    #[rstest]
    #[case(None, 84)]
    #[case(Some(84), 84)]
    #[case(Some(42), 42)]
    fn atari_gets_the_deepmind_pipeline(#[case] dim: Option<usize>, #[case] expected: usize) {
        let options = ModelOptions {
            dim,
            ..ModelOptions::default()
        };
        let wrapped = wrap_for_training(atari_env(), &options, &ModelCatalog).unwrap();
        assert_eq!(wrapped.observation_shape(), vec![expected, expected, 4]);
    }

    #[test]
    fn custom_preprocessor_overrides_the_atari_default() {
        let options = ModelOptions {
            custom_preprocessor: Some("identity".into()),
            ..ModelOptions::default()
        };
        let wrapped = wrap_for_training(atari_env(), &options, &ModelCatalog).unwrap();
        // The identity catalog wrapper leaves raw frames untouched.
        assert_eq!(wrapped.observation_shape(), vec![210, 160, 3]);
    }

    #[test]
    fn custom_preprocessor_with_dim_still_uses_the_catalog() {
        let options = ModelOptions {
            custom_preprocessor: Some("flatten".into()),
            dim: Some(42),
        };
        let wrapped = wrap_for_training(atari_env(), &options, &ModelCatalog).unwrap();
        assert_eq!(wrapped.observation_shape(), vec![210 * 160 * 3]);
    }

    #[test]
    fn generic_env_uses_the_catalog() {
        let wrapped =
            wrap_for_training(generic_env(), &ModelOptions::default(), &ModelCatalog).unwrap();
        // Vector observations pass through the catalog default unchanged.
        assert_eq!(wrapped.observation_shape(), vec![4]);
    }

    #[test]
    fn generic_env_with_custom_preprocessor_uses_the_catalog() {
        let options = ModelOptions {
            custom_preprocessor: Some("flatten".into()),
            ..ModelOptions::default()
        };
        let wrapped = wrap_for_training(generic_env(), &options, &ModelCatalog).unwrap();
        assert_eq!(wrapped.observation_shape(), vec![4]);
    }

    #[test]
    fn unknown_custom_preprocessor_is_an_error() {
        let options = ModelOptions {
            custom_preprocessor: Some("mystery".into()),
            ..ModelOptions::default()
        };
        let error = wrap_for_training(atari_env(), &options, &ModelCatalog)
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(error, ExperimentError::Orchestration(_)));
    }
}
