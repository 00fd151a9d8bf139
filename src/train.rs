//! The training phase
use crate::agents::Agent;
use crate::checkpoint::Checkpoint;
use crate::cli::TrainOptions;
use crate::envs::wrappers::wrap_for_training;
use crate::envs::build_env;
use crate::error::ExperimentError;
use crate::logging::{CliLogger, Event, Logger};
use crate::models::ModelCatalog;
use crate::simulation::run_episode;
use crate::utils::stats::OnlineStats;
use crate::RngState;
use std::time::Duration;

/// Per-episode step cutoff during training.
const MAX_EPISODE_STEPS: u64 = 10_000;

/// Train an agent, logging progress to stderr.
pub fn run(options: &TrainOptions) -> Result<(), ExperimentError> {
    let mut logger = CliLogger::new(Duration::from_secs(1));
    run_with_logger(options, &mut logger)
}

pub fn run_with_logger(
    options: &TrainOptions,
    logger: &mut dyn Logger,
) -> Result<(), ExperimentError> {
    let mut rngs = RngState::from_base_seed(options.seed);
    let env = build_env(&options.env)?;
    let model_options = options.model_options();
    let catalog = ModelCatalog::default();
    let mut env = wrap_for_training(env, &model_options, &catalog)?;
    let mut agent = Agent::build(&options.run, env.as_ref())?;

    for _ in 0..options.epochs {
        let mut returns = OnlineStats::new();
        let mut steps_this_epoch = 0;
        while steps_this_epoch < options.steps_per_epoch {
            let summary = run_episode(
                env.as_mut(),
                &mut agent,
                &mut rngs,
                MAX_EPISODE_STEPS,
                true,
                logger,
            );
            returns.push(summary.episode_return);
            steps_this_epoch += summary.steps;
        }
        logger.log(Event::Epoch, "mean_return", returns.mean());
        logger.log(Event::Epoch, "episodes", returns.count() as f64);
        logger.done(Event::Epoch);
    }

    if let Some(path) = &options.checkpoint_out {
        Checkpoint::new(&options.env, model_options, agent).save(path)?;
    }
    Ok(())
}
