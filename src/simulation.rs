//! Running agents in environments
use crate::agents::{Agent, Transition};
use crate::envs::Env;
use crate::logging::{Event, Logger};
use crate::RngState;

/// Summary of one completed episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    /// Total undiscounted reward.
    pub episode_return: f64,
    /// Number of steps taken.
    pub steps: u64,
}

/// Run one episode, optionally updating the agent after each step.
///
/// The episode is cut off after `max_steps` steps. Environment dynamics draw
/// from the `general` random stream and the agent from the `learner` stream,
/// so agents with different draw counts do not perturb the environment.
pub fn run_episode(
    env: &mut dyn Env,
    agent: &mut Agent,
    rngs: &mut RngState,
    max_steps: u64,
    learn: bool,
    logger: &mut dyn Logger,
) -> EpisodeSummary {
    let mut observation = env.reset(&mut rngs.general);
    let mut episode_return = 0.0;
    let mut steps = 0;
    while steps < max_steps {
        let action = agent.act(&observation, &mut rngs.learner);
        let step = env.step(action, &mut rngs.general);
        episode_return += step.reward;
        steps += 1;
        logger.log(Event::Step, "reward", step.reward);
        logger.done(Event::Step);

        if learn {
            let next_observation = if step.episode_done {
                None
            } else {
                Some(step.observation.clone())
            };
            agent.update(&Transition {
                observation,
                action,
                reward: step.reward,
                next_observation,
            });
        }
        observation = step.observation;
        if step.episode_done {
            break;
        }
    }
    logger.log(Event::Episode, "return", episode_return);
    logger.log(Event::Episode, "length", steps as f64);
    logger.done(Event::Episode);
    EpisodeSummary {
        episode_return,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envs::CartPole;

    #[test]
    fn episode_ends_or_hits_the_cutoff() {
        let mut env = CartPole::default();
        let mut agent = Agent::build("Random", &env).unwrap();
        let mut rngs = RngState::from_base_seed(17);
        let summary = run_episode(&mut env, &mut agent, &mut rngs, 100, false, &mut ());
        assert!(summary.steps >= 1);
        assert!(summary.steps <= 100);
        // CartPole yields reward 1 per step.
        assert_eq!(summary.episode_return, summary.steps as f64);
    }

    #[test]
    fn identical_seeds_give_identical_episodes() {
        let run = || {
            let mut env = CartPole::default();
            let mut agent = Agent::build("Random", &env).unwrap();
            let mut rngs = RngState::seed(4, 5, 6);
            run_episode(&mut env, &mut agent, &mut rngs, 200, false, &mut ())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn learning_populates_the_q_table() {
        let mut env = CartPole::default();
        let mut agent = Agent::build("TabularQ", &env).unwrap();
        let mut rngs = RngState::from_base_seed(3);
        run_episode(&mut env, &mut agent, &mut rngs, 200, true, &mut ());
        match &agent {
            Agent::TabularQ(tabular) => assert!(tabular.num_cells() > 0),
            _ => unreachable!(),
        }
    }
}
