//! Betting simulation over a stream of real extractions.
//!
//! [`EnvironmentState`] is a plain value: [`BettingSimulator::step`] never mutates its
//! input, it returns the successor state together with the reward. [`RouletteEnv`]
//! drives the simulator from a recorded series and exposes it as an [`Environment`].

use super::{Environment, StepInfo};
use crate::common::defs::{Continous, Discrete, UNOBSERVED};
use crate::error::{Error, Result};
use crate::wheel::{Color, WheelNumber, WheelTopology, NUMBERS};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Cardinality of the action space: one bet per number plus red and black.
pub const STATES: usize = NUMBERS + 2;

const RED_ACTION: Discrete = NUMBERS as Discrete;
const BLACK_ACTION: Discrete = NUMBERS as Discrete + 1;

/// Payout multiple of a winning single-number bet.
const NUMBER_PAYOUT: Continous = 35.;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetColor {
    Red,
    Black,
}

impl From<BetColor> for Color {
    fn from(c: BetColor) -> Color {
        match c {
            BetColor::Red => Color::Red,
            BetColor::Black => Color::Black,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    BetOnNumber(WheelNumber),
    BetOnColor(BetColor),
}

impl Action {
    /// Decodes the flat action index: `0..=36` bet on that number, 37 red, 38 black.
    pub fn from_index(index: Discrete) -> Result<Self> {
        match index {
            RED_ACTION => Ok(Action::BetOnColor(BetColor::Red)),
            BLACK_ACTION => Ok(Action::BetOnColor(BetColor::Black)),
            i if (0..RED_ACTION).contains(&i) => Ok(Action::BetOnNumber(
                WheelNumber::new(i as i64).map_err(|e| Error::InvalidAction(e.to_string()))?,
            )),
            i => Err(Error::InvalidAction(format!(
                "action {i} is outside 0..{STATES}"
            ))),
        }
    }

    pub fn number(n: i64) -> Result<Self> {
        WheelNumber::new(n)
            .map(Action::BetOnNumber)
            .map_err(|e| Error::InvalidAction(e.to_string()))
    }

    pub fn all() -> impl Iterator<Item = Action> {
        (0..STATES as Discrete).filter_map(|i| Self::from_index(i).ok())
    }

    pub fn index(&self) -> Discrete {
        match self {
            Action::BetOnNumber(n) => (*n).into(),
            Action::BetOnColor(BetColor::Red) => RED_ACTION,
            Action::BetOnColor(BetColor::Black) => BLACK_ACTION,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Active,
    Terminal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentState {
    capital: Continous,
    step_count: usize,
    rolling_window: VecDeque<Option<WheelNumber>>,
    done: bool,
}

impl EnvironmentState {
    pub fn capital(&self) -> Continous {
        self.capital
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn phase(&self) -> Phase {
        if self.done {
            Phase::Terminal
        } else if self.step_count == 0 {
            Phase::Ready
        } else {
            Phase::Active
        }
    }

    /// Most recent spin last; slots not yet filled read as [`UNOBSERVED`].
    pub fn observation(&self) -> Vec<Discrete> {
        self.rolling_window
            .iter()
            .map(|slot| slot.map_or(UNOBSERVED, Discrete::from))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    pub initial_capital: Continous,
    pub bet_amount: Continous,
    pub max_steps: usize,
    pub perceptive_size: usize,
}

impl SimulatorConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("initial_capital", self.initial_capital)?;
        ensure_positive("bet_amount", self.bet_amount)?;
        if self.max_steps == 0 {
            return Err(Error::invalid_parameter("max_steps must be at least 1"));
        }
        if self.perceptive_size == 0 {
            return Err(Error::invalid_parameter(
                "perceptive_size must be at least 1",
            ));
        }

        Ok(())
    }
}

fn ensure_positive(name: &str, v: Continous) -> Result<()> {
    if v.is_finite() && v > 0. {
        Ok(())
    } else {
        Err(Error::invalid_parameter(format!(
            "{name} must be a positive number, got {v}"
        )))
    }
}

/// Fresh episode state: full capital, no steps, every window slot unobserved.
pub fn reset(initial_capital: Continous, window_capacity: usize) -> Result<EnvironmentState> {
    ensure_positive("initial_capital", initial_capital)?;
    if window_capacity == 0 {
        return Err(Error::invalid_parameter(
            "window capacity must be at least 1",
        ));
    }

    Ok(EnvironmentState {
        capital: initial_capital,
        step_count: 0,
        rolling_window: VecDeque::from(vec![None; window_capacity]),
        done: false,
    })
}

#[derive(Clone, Debug)]
pub struct BettingSimulator {
    config: SimulatorConfig,
    wheel: WheelTopology,
}

impl BettingSimulator {
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            wheel: WheelTopology::european(),
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn reset(&self) -> Result<EnvironmentState> {
        reset(self.config.initial_capital, self.config.perceptive_size)
    }

    pub fn step(
        &self,
        state: &EnvironmentState,
        action: Action,
        next_extraction: WheelNumber,
    ) -> Result<(EnvironmentState, Continous)> {
        self.step_with_bet(state, action, next_extraction, self.config.bet_amount)
    }

    /// Shows `next_extraction` to the observer, then settles `action` against it.
    pub fn step_with_bet(
        &self,
        state: &EnvironmentState,
        action: Action,
        next_extraction: WheelNumber,
        bet_amount: Continous,
    ) -> Result<(EnvironmentState, Continous)> {
        if state.done {
            return Err(Error::InvalidState(format!(
                "episode already ended after {} steps with capital {}",
                state.step_count, state.capital
            )));
        }
        ensure_positive("bet_amount", bet_amount)?;

        let mut next = state.clone();
        next.rolling_window.pop_front();
        next.rolling_window.push_back(Some(next_extraction));

        let reward = match action {
            Action::BetOnNumber(n) if n == next_extraction => NUMBER_PAYOUT * bet_amount,
            Action::BetOnColor(c) if self.wheel.color_of(next_extraction) == Color::from(c) => {
                bet_amount
            }
            _ => -bet_amount,
        };
        next.capital += reward;
        next.step_count += 1;
        next.done = next.capital <= 0. || next.step_count >= self.config.max_steps;

        debug!(
            action = action.index(),
            extraction = %next_extraction,
            reward,
            capital = next.capital,
            done = next.done,
            "settled bet"
        );

        Ok((next, reward))
    }
}

/// A [`BettingSimulator`] fed from a recorded series of extractions, one per step.
#[derive(Clone, Debug)]
pub struct RouletteEnv {
    simulator: BettingSimulator,
    extractions: Vec<WheelNumber>,
    cursor: usize,
    state: EnvironmentState,
}

impl RouletteEnv {
    pub fn new(simulator: BettingSimulator, extractions: Vec<WheelNumber>) -> Result<Self> {
        let state = simulator.reset()?;

        Ok(Self {
            simulator,
            extractions,
            cursor: 0,
            state,
        })
    }

    pub fn state(&self) -> &EnvironmentState {
        &self.state
    }

    pub fn remaining_extractions(&self) -> usize {
        self.extractions.len() - self.cursor
    }
}

impl Environment for RouletteEnv {
    type Action = Action;

    fn reset(&mut self) -> Result<Vec<Discrete>> {
        self.state = self.simulator.reset()?;
        self.cursor = 0;

        Ok(self.state.observation())
    }

    fn step(&mut self, action: &Action) -> Result<StepInfo> {
        let next_extraction = *self.extractions.get(self.cursor).ok_or_else(|| {
            Error::InvalidState(format!(
                "extraction series exhausted after {} spins",
                self.cursor
            ))
        })?;

        let (state, reward) = self.simulator.step(&self.state, *action, next_extraction)?;
        self.state = state;
        self.cursor += 1;

        Ok(StepInfo {
            observation: self.state.observation(),
            reward,
            terminated: self.state.capital <= 0.,
            truncated: self.state.step_count >= self.simulator.config.max_steps,
            capital: self.state.capital,
        })
    }

    fn observation_shape(&self) -> Vec<usize> {
        vec![self.simulator.config.perceptive_size]
    }

    fn action_count(&self) -> usize {
        STATES
    }
}
