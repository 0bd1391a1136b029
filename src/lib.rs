extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod common;
pub mod config;
pub mod dataset;
pub mod envs;
pub mod error;
pub mod ledger;
pub mod policy;
pub mod wheel;
pub mod windowing;

pub use common::defs::*;
pub use config::{Configuration, Encoding};
pub use dataset::{load_extractions, read_extractions, ExtractionSeries};
pub use envs::roulette::{
    reset, Action, BetColor, BettingSimulator, EnvironmentState, Phase, RouletteEnv,
    SimulatorConfig, STATES,
};
pub use envs::{Environment, StepInfo};
pub use error::{Error, Result};
pub use ledger::{EpochMetrics, Resumption, SessionLedger, TrainingSession};
pub use policy::{play_episode, ConstantPolicy, Episode, EpisodeSummary, Policy, RandomPolicy};
pub use wheel::{Color, WheelNumber, WheelPosition, WheelTopology, NUMBERS};
pub use windowing::{SequenceWindower, WindowedSample};
