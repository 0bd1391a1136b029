pub mod roulette;

use crate::common::defs::{Continous, Discrete};
use crate::error::Result;

#[derive(Clone, Debug, PartialEq)]
pub struct StepInfo {
    pub observation: Vec<Discrete>,
    pub reward: Continous,
    /// The episode ended because the capital ran out.
    pub terminated: bool,
    /// The episode ended because the step limit was reached.
    pub truncated: bool,
    pub capital: Continous,
}

impl StepInfo {
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// The capability every environment exposes to a policy-evaluation loop.
pub trait Environment {
    type Action;

    fn reset(&mut self) -> Result<Vec<Discrete>>;

    fn step(&mut self, action: &Self::Action) -> Result<StepInfo>;

    fn observation_shape(&self) -> Vec<usize>;

    fn action_count(&self) -> usize;
}
