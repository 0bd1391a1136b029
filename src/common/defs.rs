use serde::{Deserialize, Serialize};

/// Integer scalar used for observations and action indices.
pub type Discrete = i32;

/// Real scalar used for capital, stakes and rewards.
pub type Continous = f64;

/// Observation slot value for a spin that has not been seen yet.
pub const UNOBSERVED: Discrete = -1;

/// One step of an episode: the observation after the step and the reward that led to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeEvent {
    pub s: Vec<Discrete>,
    pub r: Continous,
}
