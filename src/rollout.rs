//! The rollout phase
use crate::checkpoint::Checkpoint;
use crate::cli::RolloutOptions;
use crate::envs::wrappers::wrap_for_training;
use crate::envs::build_env;
use crate::error::ExperimentError;
use crate::simulation::{run_episode, EpisodeSummary};
use crate::RngState;
use std::fs::File;
use std::io::BufWriter;

/// Roll out a trained agent from a checkpoint, without learning.
pub fn run(options: &RolloutOptions) -> Result<(), ExperimentError> {
    let summaries = run_collecting(options)?;
    for (i, summary) in summaries.iter().enumerate() {
        println!(
            "episode {i}: return {} over {} steps",
            summary.episode_return, summary.steps
        );
    }
    if let Some(path) = &options.out {
        let returns: Vec<f64> = summaries.iter().map(|s| s.episode_return).collect();
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), &returns)?;
    }
    Ok(())
}

/// Run the rollout and collect per-episode summaries.
pub fn run_collecting(
    options: &RolloutOptions,
) -> Result<Vec<EpisodeSummary>, ExperimentError> {
    let checkpoint = Checkpoint::load(&options.checkpoint)?;
    if let Some(run) = &options.run {
        if run != checkpoint.agent.algorithm() {
            return Err(ExperimentError::Manager(format!(
                "checkpoint was trained with {}, not {}",
                checkpoint.agent.algorithm(),
                run
            )));
        }
    }

    let env_name = options.env.as_deref().unwrap_or(&checkpoint.env);
    let env = build_env(env_name)?;
    let mut env = wrap_for_training(env, &checkpoint.model, &Default::default())?;
    let mut agent = checkpoint.agent;
    let mut rngs = RngState::from_base_seed(options.seed);

    let mut summaries = Vec::new();
    let mut total_steps = 0;
    while total_steps < options.steps {
        let summary = run_episode(
            env.as_mut(),
            &mut agent,
            &mut rngs,
            options.steps - total_steps,
            false,
            &mut (),
        );
        total_steps += summary.steps;
        summaries.push(summary);
    }
    Ok(summaries)
}
