//! Model catalog: preprocessor resolution for environments
use crate::envs::wrappers::Wrapped;
use crate::envs::{Env, EnvFamily, EnvStep, Observation};
use crate::error::ExperimentError;
use crate::Prng;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Options controlling preprocessor construction for one experiment.
///
/// Unset fields always mean "use the default policy", never an error.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOptions {
    /// Registered preprocessor to use instead of the default selection.
    pub custom_preprocessor: Option<String>,
    /// Frame edge length for image preprocessing.
    pub dim: Option<usize>,
}

/// A stateless transformation applied to raw observations.
pub trait Preprocessor {
    /// Shape of transformed observations, given the raw observation shape.
    fn output_shape(&self, input_shape: &[usize]) -> Vec<usize>;

    /// Transform one raw observation.
    fn transform(&self, observation: Observation) -> Observation;
}

/// Preprocessor that passes observations through unchanged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity;

impl Preprocessor for Identity {
    fn output_shape(&self, input_shape: &[usize]) -> Vec<usize> {
        input_shape.to_vec()
    }

    fn transform(&self, observation: Observation) -> Observation {
        observation
    }
}

/// Preprocessor that flattens observations to a single axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flatten;

impl Preprocessor for Flatten {
    fn output_shape(&self, input_shape: &[usize]) -> Vec<usize> {
        vec![input_shape.iter().product()]
    }

    fn transform(&self, observation: Observation) -> Observation {
        Array1::from_iter(observation.iter().copied()).into_dyn()
    }
}

/// Catalog resolving observation preprocessors for environments.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelCatalog;

impl ModelCatalog {
    /// Resolve the preprocessor for an environment under the given options.
    ///
    /// An explicit `custom_preprocessor` name wins; otherwise multi-axis
    /// observations are flattened and vector observations pass through.
    pub fn preprocessor(
        &self,
        env: &dyn Env,
        options: &ModelOptions,
    ) -> Result<Box<dyn Preprocessor>, ExperimentError> {
        if let Some(name) = &options.custom_preprocessor {
            return match name.as_str() {
                "identity" => Ok(Box::new(Identity)),
                "flatten" => Ok(Box::new(Flatten)),
                _ => Err(ExperimentError::Orchestration(format!(
                    "unknown custom preprocessor {name:?}"
                ))),
            };
        }
        if env.observation_shape().len() > 1 {
            Ok(Box::new(Flatten))
        } else {
            Ok(Box::new(Identity))
        }
    }

    /// Resolve the preprocessor and adapt it as an environment wrapper.
    ///
    /// The returned environment has the same interface contract as the input
    /// and produces already-transformed observations; the inner environment
    /// is not otherwise modified.
    pub fn preprocessor_as_wrapper(
        &self,
        env: Box<dyn Env>,
        options: &ModelOptions,
    ) -> Result<Box<dyn Env>, ExperimentError> {
        let preprocessor = self.preprocessor(env.as_ref(), options)?;
        Ok(Box::new(Wrapped::new(env, preprocessor)))
    }
}

impl<E: Env> Env for Wrapped<E, Box<dyn Preprocessor>> {
    fn family(&self) -> EnvFamily {
        self.inner.family()
    }

    fn observation_shape(&self) -> Vec<usize> {
        self.wrapper.output_shape(&self.inner.observation_shape())
    }

    fn num_actions(&self) -> usize {
        self.inner.num_actions()
    }

    fn reset(&mut self, rng: &mut Prng) -> Observation {
        self.wrapper.transform(self.inner.reset(rng))
    }

    fn step(&mut self, action: usize, rng: &mut Prng) -> EnvStep {
        let EnvStep {
            observation,
            reward,
            episode_done,
        } = self.inner.step(action, rng);
        EnvStep {
            observation: self.wrapper.transform(observation),
            reward,
            episode_done,
        }
    }
}
