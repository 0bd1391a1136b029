//! Loads the extraction history from its `;`-separated CSV export.

use crate::common::defs::Discrete;
use crate::error::{Error, Result};
use crate::wheel::{Color, WheelNumber, WheelPosition, WheelTopology};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct ExtractionRecord {
    timeseries: i64,
}

/// Chronological record of observed spins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractionSeries {
    numbers: Vec<WheelNumber>,
}

impl ExtractionSeries {
    pub fn new(numbers: Vec<WheelNumber>) -> Self {
        Self { numbers }
    }

    pub fn push(&mut self, n: WheelNumber) {
        self.numbers.push(n);
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn numbers(&self) -> &[WheelNumber] {
        &self.numbers
    }

    pub fn positions(&self, wheel: &WheelTopology) -> Vec<WheelPosition> {
        self.numbers.iter().map(|&n| wheel.position_of(n)).collect()
    }

    pub fn colors(&self, wheel: &WheelTopology) -> Vec<Color> {
        self.numbers.iter().map(|&n| wheel.color_of(n)).collect()
    }

    pub fn color_classes(&self, wheel: &WheelTopology) -> Vec<Discrete> {
        self.numbers
            .iter()
            .map(|&n| wheel.color_of(n).class_index())
            .collect()
    }

    /// Keeps the most recent `floor(len * fraction)` spins.
    pub fn tail_fraction(&self, fraction: f64) -> Result<Self> {
        if !(fraction > 0. && fraction <= 1.) {
            return Err(Error::invalid_parameter(format!(
                "data_fraction {fraction} is outside (0, 1]"
            )));
        }

        let keep = (self.numbers.len() as f64 * fraction) as usize;
        Ok(Self::new(
            self.numbers[self.numbers.len() - keep..].to_vec(),
        ))
    }
}

pub fn load_extractions(path: impl AsRef<Path>) -> Result<ExtractionSeries> {
    let path = path.as_ref();
    let series = read_extractions(File::open(path)?)?;
    info!(path = %path.display(), rows = series.len(), "loaded extractions");

    Ok(series)
}

/// Reads rows in file order; any column besides `timeseries` is ignored.
pub fn read_extractions<R: Read>(reader: R) -> Result<ExtractionSeries> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut series = ExtractionSeries::default();
    for (row, record) in rdr.deserialize::<ExtractionRecord>().enumerate() {
        let row_error =
            |e: &dyn std::fmt::Display| Error::Dataset(format!("row {}: {e}", row + 1));
        let record = match record {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Deserialize { .. }) => {
                return Err(row_error(&e))
            }
            Err(e) => return Err(e.into()),
        };
        let n = WheelNumber::new(record.timeseries).map_err(|e| row_error(&e))?;
        series.push(n);
    }

    Ok(series)
}
