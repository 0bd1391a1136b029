//! Training progress that survives interrupted and continued runs.
//!
//! A checkpoint folder holds one session artifact. A new training invocation either
//! starts from scratch (no artifact yet) or resumes strictly on top of the epochs
//! already completed. The artifact is only ever replaced whole.

use crate::config::Configuration;
use crate::error::{Error, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const SESSION_FILE: &str = "session_state.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch: u64,
    pub metrics: BTreeMap<String, f64>,
}

impl EpochMetrics {
    pub fn new(epoch: u64) -> Self {
        Self {
            epoch,
            metrics: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }

    /// JSON has no NaN or infinity, so such values could be written but never read back.
    fn check_finite(&self) -> Result<()> {
        match self.metrics.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, value)) => Err(Error::invalid_parameter(format!(
                "epoch {} metric {name} is {value}",
                self.epoch
            ))),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    #[serde(rename = "total_epochs")]
    total_epochs_completed: u64,
    history: Vec<EpochMetrics>,
    #[serde(rename = "val_history")]
    validation_history: Option<Vec<EpochMetrics>>,
    #[serde(rename = "configuration")]
    config_snapshot: Value,
}

impl TrainingSession {
    pub fn new(config_snapshot: Value) -> Self {
        Self {
            total_epochs_completed: 0,
            history: Vec::new(),
            validation_history: None,
            config_snapshot,
        }
    }

    pub fn total_epochs_completed(&self) -> u64 {
        self.total_epochs_completed
    }

    pub fn history(&self) -> &[EpochMetrics] {
        &self.history
    }

    pub fn validation_history(&self) -> Option<&[EpochMetrics]> {
        self.validation_history.as_deref()
    }

    pub fn config_snapshot(&self) -> &Value {
        &self.config_snapshot
    }

    /// Appends as given. Epoch numbers are neither checked nor reordered; non-finite
    /// metric values are rejected and leave the session untouched.
    pub fn record_epoch(
        &mut self,
        metrics: EpochMetrics,
        validation: Option<EpochMetrics>,
    ) -> Result<()> {
        metrics.check_finite()?;
        if let Some(v) = &validation {
            v.check_finite()?;
        }

        self.history.push(metrics);
        if let Some(v) = validation {
            self.validation_history.get_or_insert_with(Vec::new).push(v);
        }
        self.total_epochs_completed += 1;

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Resumption {
    pub from_epoch: u64,
    pub target_epoch: u64,
    pub session: TrainingSession,
}

impl Resumption {
    pub fn prior_history(&self) -> &[EpochMetrics] {
        self.session.history()
    }
}

#[derive(Clone, Debug)]
pub struct SessionLedger {
    configured_epochs: u64,
    config_snapshot: Value,
}

impl SessionLedger {
    pub fn new(configured_epochs: u64, config_snapshot: Value) -> Self {
        Self {
            configured_epochs,
            config_snapshot,
        }
    }

    pub fn from_config(cfg: &Configuration) -> Result<Self> {
        Ok(Self::new(cfg.training.epochs, cfg.snapshot()?))
    }

    /// Fresh checkpoints run `0..configured_epochs`. Existing ones continue from
    /// their completed count for `additional_epochs` more. An unreadable artifact
    /// is an error, never a silent restart.
    pub fn begin_or_resume(
        &self,
        checkpoint: impl AsRef<Path>,
        additional_epochs: u64,
    ) -> Result<Resumption> {
        let checkpoint = checkpoint.as_ref();
        let session = match load(checkpoint) {
            Ok(session) => session,
            Err(Error::NotFound { .. }) => {
                info!(
                    checkpoint = %checkpoint.display(),
                    epochs = self.configured_epochs,
                    "starting new training session"
                );
                return Ok(Resumption {
                    from_epoch: 0,
                    target_epoch: self.configured_epochs,
                    session: TrainingSession::new(self.config_snapshot.clone()),
                });
            }
            Err(e) => return Err(e),
        };
        let from_epoch = session.total_epochs_completed;
        let target_epoch = from_epoch + additional_epochs;
        info!(
            checkpoint = %checkpoint.display(),
            from_epoch,
            target_epoch,
            "resuming training session"
        );

        Ok(Resumption {
            from_epoch,
            target_epoch,
            session,
        })
    }
}

pub fn session_path(checkpoint: &Path) -> PathBuf {
    checkpoint.join(SESSION_FILE)
}

/// Replaces the artifact atomically: readers see either the old file or the new one.
pub fn persist(session: &TrainingSession, checkpoint: impl AsRef<Path>) -> Result<PathBuf> {
    let checkpoint = checkpoint.as_ref();
    fs::create_dir_all(checkpoint)?;
    let path = session_path(checkpoint);

    let mut tmp = tempfile::Builder::new()
        .prefix(".session_state")
        .suffix(".tmp")
        .tempfile_in(checkpoint)?;
    serde_json::to_writer_pretty(&mut tmp, session).map_err(std::io::Error::from)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(&path).map_err(|e| e.error)?;

    info!(
        path = %path.display(),
        total_epochs = session.total_epochs_completed,
        "saved training session"
    );

    Ok(path)
}

pub fn load(checkpoint: impl AsRef<Path>) -> Result<TrainingSession> {
    let path = session_path(checkpoint.as_ref());
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::NotFound { path }),
        Err(e) => return Err(e.into()),
    };

    serde_json::from_slice(&bytes).map_err(|source| Error::CorruptSession { path, source })
}

/// Creates `<root>/<model_name>_<YYYYMMDD>H<HHMM>` and returns its path.
pub fn create_checkpoint_folder(root: impl AsRef<Path>, model_name: &str) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%dH%H%M");
    let path = root.as_ref().join(format!("{model_name}_{stamp}"));
    fs::create_dir_all(&path)?;

    Ok(path)
}

/// Checkpoint folders under `root` that hold a session artifact, sorted by name.
pub fn list_checkpoints(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut folders = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() && session_path(&path).exists() {
            folders.push(path);
        }
    }

    Ok(folders.into_iter().sorted().collect())
}
