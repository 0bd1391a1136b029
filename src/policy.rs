use crate::common::defs::{Continous, Discrete, EpisodeEvent};
use crate::envs::roulette::Action;
use crate::envs::Environment;
use crate::error::Result;
use rand::prelude::*;
use serde::Serialize;
use tracing::info;

pub trait Policy {
    fn policy(&mut self, s: &[Discrete]) -> Action;
}

impl<F> Policy for F
where
    F: FnMut(&[Discrete]) -> Action,
{
    fn policy(&mut self, s: &[Discrete]) -> Action {
        self(s)
    }
}

/// Places the same bet on every spin.
#[derive(Clone, Copy, Debug)]
pub struct ConstantPolicy(pub Action);

impl Policy for ConstantPolicy {
    fn policy(&mut self, _s: &[Discrete]) -> Action {
        self.0
    }
}

/// Picks uniformly among all actions. Deterministic for a given generator seed.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: StdRng,
    actions: Vec<Action>,
}

impl RandomPolicy {
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng,
            actions: Action::all().collect(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Policy for RandomPolicy {
    fn policy(&mut self, _s: &[Discrete]) -> Action {
        let i = self.rng.gen_range(0..self.actions.len());
        self.actions[i]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub steps: usize,
    pub total_reward: Continous,
    pub final_capital: Continous,
    pub wins: usize,
    pub losses: usize,
}

#[derive(Clone, Debug)]
pub struct Episode {
    /// Starts with the post-reset observation and a zero reward.
    pub events: Vec<EpisodeEvent>,
    pub summary: EpisodeSummary,
}

/// Resets `env` and lets `policy` bet until the episode is done.
pub fn play_episode<E, P>(env: &mut E, policy: &mut P) -> Result<Episode>
where
    E: Environment<Action = Action>,
    P: Policy + ?Sized,
{
    let mut s = env.reset()?;
    let mut events = vec![EpisodeEvent {
        s: s.clone(),
        r: Default::default(),
    }];
    let mut summary = EpisodeSummary::default();

    loop {
        let action = policy.policy(&s);
        let si = env.step(&action)?;

        summary.steps += 1;
        summary.total_reward += si.reward;
        summary.final_capital = si.capital;
        if si.reward > 0. {
            summary.wins += 1;
        } else {
            summary.losses += 1;
        }

        events.push(EpisodeEvent {
            s: si.observation.clone(),
            r: si.reward,
        });
        if si.done() {
            break;
        }

        s = si.observation;
    }

    info!(
        steps = summary.steps,
        total_reward = summary.total_reward,
        final_capital = summary.final_capital,
        "episode finished"
    );

    Ok(Episode { events, summary })
}
