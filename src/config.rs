//! Run configuration, read once from JSON and handed to each component by value.

use crate::envs::roulette::SimulatorConfig;
use crate::error::{Error, Result};
use crate::windowing::SequenceWindower;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Raw wheel numbers, 37 classes.
    #[default]
    Numbers,
    /// Color classes green/black/red.
    Colors,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub seed: u64,
    pub dataset: DatasetConfig,
    pub environment: EnvironmentConfig,
    pub training: TrainingConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            seed: 42,
            dataset: Default::default(),
            environment: Default::default(),
            training: Default::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    #[serde(alias = "window_size")]
    pub perceptive_size: usize,
    pub output_size: usize,
    pub test_fraction: f64,
    pub invert_test: bool,
    pub data_fraction: f64,
    pub encoding: Encoding,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            perceptive_size: 30,
            output_size: 1,
            test_fraction: 0.1,
            invert_test: false,
            data_fraction: 1.0,
            encoding: Encoding::Numbers,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub initial_capital: f64,
    pub bet_amount: f64,
    pub max_steps: usize,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            initial_capital: 1000.,
            bet_amount: 10.,
            max_steps: 1000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub epochs: u64,
    pub additional_epochs: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            additional_epochs: 10,
        }
    }
}

impl Configuration {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let cfg = serde_json::from_slice::<Self>(&bytes).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;

        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.windower()?;
        self.simulator()?;

        let d = &self.dataset;
        if !(0.0..1.0).contains(&d.test_fraction) {
            return Err(Error::invalid_parameter(format!(
                "dataset.test_fraction {} is outside [0, 1)",
                d.test_fraction
            )));
        }
        if !(d.data_fraction > 0. && d.data_fraction <= 1.) {
            return Err(Error::invalid_parameter(format!(
                "dataset.data_fraction {} is outside (0, 1]",
                d.data_fraction
            )));
        }

        Ok(())
    }

    pub fn windower(&self) -> Result<SequenceWindower> {
        SequenceWindower::new(self.dataset.perceptive_size, self.dataset.output_size)
    }

    pub fn simulator(&self) -> Result<SimulatorConfig> {
        let cfg = SimulatorConfig {
            initial_capital: self.environment.initial_capital,
            bet_amount: self.environment.bet_amount,
            max_steps: self.environment.max_steps,
            perceptive_size: self.dataset.perceptive_size,
        };
        cfg.validate()?;

        Ok(cfg)
    }

    /// JSON form stored alongside training history.
    pub fn snapshot(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| Error::Io(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        Configuration::default().validate().unwrap();
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"seed": 7, "dataset": {{"window_size": 12}}, "environment": {{"bet_amount": 5}}}}"#
        )
        .unwrap();

        let cfg = Configuration::load(file.path()).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.dataset.perceptive_size, 12);
        assert_eq!(cfg.dataset.output_size, 1);
        assert_eq!(cfg.environment.bet_amount, 5.);
        assert_eq!(cfg.training, TrainingConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(matches!(
            Configuration::load(file.path()),
            Err(Error::Config { .. })
        ));
    }

    #[rstest]
    #[case(|c: &mut Configuration| c.dataset.perceptive_size = 0)]
    #[case(|c: &mut Configuration| c.dataset.output_size = 0)]
    #[case(|c: &mut Configuration| c.dataset.test_fraction = 1.0)]
    #[case(|c: &mut Configuration| c.dataset.data_fraction = 0.0)]
    #[case(|c: &mut Configuration| c.environment.initial_capital = 0.)]
    #[case(|c: &mut Configuration| c.environment.bet_amount = -1.)]
    #[case(|c: &mut Configuration| c.environment.max_steps = 0)]
    fn invalid_values_are_rejected(#[case] tweak: fn(&mut Configuration)) {
        let mut cfg = Configuration::default();
        tweak(&mut cfg);

        assert!(matches!(cfg.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn snapshot_round_trips() {
        let cfg = Configuration::default();
        let snapshot = cfg.snapshot().unwrap();
        assert_eq!(snapshot["dataset"]["perceptive_size"], 30);

        let back = serde_json::from_value::<Configuration>(snapshot).unwrap();
        assert_eq!(back, cfg);
    }
}
