mod parser;

use super::calibration::Calibration;
use super::domain::IndicatorId;
use super::index::{z_score, IndexEngine, ScoreSnapshot};
use super::simulation::SimulatedIndicator;
use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum OverrideError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownIndicator(IndicatorId),
}

impl fmt::Display for OverrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideError::Io(err) => write!(f, "failed to read override values: {}", err),
            OverrideError::Csv(err) => write!(f, "invalid override CSV data: {}", err),
            OverrideError::UnknownIndicator(id) => {
                write!(f, "override references unknown indicator {}", id)
            }
        }
    }
}

impl std::error::Error for OverrideError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverrideError::Io(err) => Some(err),
            OverrideError::Csv(err) => Some(err),
            OverrideError::UnknownIndicator(_) => None,
        }
    }
}

impl From<std::io::Error> for OverrideError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for OverrideError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// A partial indicator-id to raw-value map for manual what-if scenarios.
/// Later entries for the same indicator win, matching form-style input.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    entries: Vec<(IndicatorId, f64)>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, indicator: IndicatorId, value: f64) {
        self.entries.push((indicator, value));
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (IndicatorId, f64)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Loads `indicator_id,value` rows from a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, OverrideError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, OverrideError> {
        Ok(Self {
            entries: parser::parse_rows(reader)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Re-scored index for a manually supplied indicator vector.
#[derive(Debug, Clone, Serialize)]
pub struct WhatIfOutcome {
    pub snapshot: ScoreSnapshot,
    pub mcei_delta: f64,
    pub indicators: Vec<SimulatedIndicator>,
}

/// Scores a what-if indicator vector: baseline values patched with the
/// overrides, every z-score recomputed with clamping to the historical
/// bounds enabled. Bypasses the intervention impact model entirely; this is
/// the one path where extreme manual entries are reined in.
pub fn what_if(
    overrides: &OverrideSet,
    calibration: &Calibration,
) -> Result<WhatIfOutcome, OverrideError> {
    let mut values = calibration.baseline_values();
    for &(indicator, value) in &overrides.entries {
        let idx = calibration
            .indicator_index(indicator)
            .ok_or(OverrideError::UnknownIndicator(indicator))?;
        values[idx] = value;
    }

    let mut z_scores = Vec::with_capacity(values.len());
    let mut indicators = Vec::with_capacity(values.len());
    for (indicator, &value) in calibration.indicators.iter().zip(values.iter()) {
        let z = z_score(
            value,
            indicator.mean,
            indicator.std_dev,
            indicator.polarity,
            Some((indicator.min, indicator.max)),
        );
        z_scores.push(z);
        indicators.push(SimulatedIndicator {
            id: indicator.id,
            name: indicator.name,
            unit: indicator.unit,
            baseline: indicator.value,
            simulated: value,
            z_score: z,
        });
    }

    let engine = IndexEngine::new(calibration);
    let snapshot = engine.snapshot_from_z(&z_scores);
    let mcei_delta = snapshot.mcei_normalized - engine.baseline_snapshot().mcei_normalized;

    Ok(WhatIfOutcome {
        snapshot,
        mcei_delta,
        indicators,
    })
}
