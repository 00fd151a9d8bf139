//! Command-line interface
mod options;

pub use options::{Command, Options, RolloutOptions, TrainOptions};

use crate::error::ExperimentError;
use crate::{rollout, train};
use clap::{CommandFactory, Parser};
use std::ffi::OsString;

/// Run one phase of an experiment.
pub trait PhaseRunner {
    fn train(&mut self, options: &TrainOptions) -> Result<(), ExperimentError>;
    fn rollout(&mut self, options: &RolloutOptions) -> Result<(), ExperimentError>;
}

/// The standard phase implementations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Phases;

impl PhaseRunner for Phases {
    fn train(&mut self, options: &TrainOptions) -> Result<(), ExperimentError> {
        train::run(options)
    }

    fn rollout(&mut self, options: &RolloutOptions) -> Result<(), ExperimentError> {
        rollout::run(options)
    }
}

/// Dispatch parsed options to the matching phase runner method.
///
/// Without a subcommand, prints the help text and succeeds.
pub fn dispatch(
    options: &Options,
    runner: &mut dyn PhaseRunner,
) -> Result<(), ExperimentError> {
    match &options.command {
        Some(Command::Train(train_options)) => runner.train(train_options),
        Some(Command::Rollout(rollout_options)) => runner.rollout(rollout_options),
        None => {
            Options::command().print_help()?;
            Ok(())
        }
    }
}

/// Parse arguments and run the selected experiment phase.
pub fn run<I, T>(argv: I) -> Result<(), ExperimentError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let options = Options::parse_from(argv);
    dispatch(&options, &mut Phases)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runner that records which phases were invoked.
    #[derive(Default)]
    struct RecordingRunner {
        trained: Vec<TrainOptions>,
        rolled_out: Vec<RolloutOptions>,
    }

    impl PhaseRunner for RecordingRunner {
        fn train(&mut self, options: &TrainOptions) -> Result<(), ExperimentError> {
            self.trained.push(options.clone());
            Ok(())
        }

        fn rollout(&mut self, options: &RolloutOptions) -> Result<(), ExperimentError> {
            self.rolled_out.push(options.clone());
            Ok(())
        }
    }

    #[test]
    fn valid_command_definition() {
        Options::command().debug_assert();
    }

    #[test]
    fn train_dispatches_exactly_once() {
        let options = Options::parse_from([
            "rlrun",
            "train",
            "--run",
            "TabularQ",
            "--env",
            "CartPole-v0",
        ]);
        let mut runner = RecordingRunner::default();
        dispatch(&options, &mut runner).unwrap();
        assert_eq!(runner.trained.len(), 1);
        assert_eq!(runner.rolled_out.len(), 0);
        assert_eq!(runner.trained[0].run, "TabularQ");
        assert_eq!(runner.trained[0].env, "CartPole-v0");
    }

    #[test]
    fn rollout_dispatches_exactly_once() {
        let options = Options::parse_from([
            "rlrun",
            "rollout",
            "/tmp/checkpoint.json",
            "--run",
            "TabularQ",
        ]);
        let mut runner = RecordingRunner::default();
        dispatch(&options, &mut runner).unwrap();
        assert_eq!(runner.trained.len(), 0);
        assert_eq!(runner.rolled_out.len(), 1);
        assert_eq!(runner.rolled_out[0].run.as_deref(), Some("TabularQ"));
    }

    #[test]
    fn no_subcommand_prints_help_and_runs_no_phase() {
        let options = Options::parse_from(["rlrun"]);
        assert_eq!(options.command, None);
        let mut runner = RecordingRunner::default();
        dispatch(&options, &mut runner).unwrap();
        assert_eq!(runner.trained.len(), 0);
        assert_eq!(runner.rolled_out.len(), 0);
    }

    #[test]
    fn train_requires_run_and_env() {
        assert!(Options::try_parse_from(["rlrun", "train", "--run", "TabularQ"]).is_err());
        assert!(Options::try_parse_from(["rlrun", "train", "--env", "CartPole-v0"]).is_err());
    }

    #[test]
    fn rollout_requires_a_checkpoint_path() {
        assert!(Options::try_parse_from(["rlrun", "rollout"]).is_err());
    }

    #[test]
    fn train_defaults() {
        let options = Options::parse_from([
            "rlrun",
            "train",
            "--run",
            "Random",
            "--env",
            "PixelPaddle-v0",
        ]);
        let train_options = match options.command.unwrap() {
            Command::Train(train_options) => train_options,
            _ => unreachable!(),
        };
        assert_eq!(train_options.seed, 0);
        assert_eq!(train_options.epochs, 10);
        assert_eq!(train_options.steps_per_epoch, 1000);
        assert_eq!(train_options.custom_preprocessor, None);
        assert_eq!(train_options.dim, None);
    }
}
