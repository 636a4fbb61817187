mod taurasi;

use super::domain::{
    Benchmark, DomainCode, GoalWeights, Indicator, IndicatorId, Intervention, InterventionId,
    MunicipalityProfile,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Number of retained principal components; loadings rows carry one weight
/// per component.
pub const PCA_COMPONENTS: usize = 3;

/// Upper bound on the intervention catalog so the exhaustive 2^N subset
/// search stays tractable.
pub const MAX_CATALOG_SIZE: usize = 20;

/// Fixed PCA calibration: explained variance percentages used directly as
/// weights, and one loadings row per indicator (row i belongs to indicator
/// id i + 1).
#[derive(Debug, Clone, Serialize)]
pub struct PcaModel {
    pub variance: [f64; PCA_COMPONENTS],
    pub loadings: Vec<[f64; PCA_COMPONENTS]>,
}

/// Normalization bounds for the composite index and each domain.
#[derive(Debug, Clone, Serialize)]
pub struct Benchmarks {
    pub mcei: Benchmark,
    pub domains: HashMap<DomainCode, Benchmark>,
}

impl Benchmarks {
    pub fn domain(&self, code: DomainCode) -> Option<Benchmark> {
        self.domains.get(&code).copied()
    }
}

/// Immutable reference data the whole engine computes against: municipality
/// statistics, indicator definitions, PCA weights, normalization benchmarks,
/// the intervention catalog, and goal-programming weights. Supplied once at
/// startup and validated before use.
#[derive(Debug, Clone, Serialize)]
pub struct Calibration {
    pub municipality: MunicipalityProfile,
    pub indicators: Vec<Indicator>,
    pub pca: PcaModel,
    pub benchmarks: Benchmarks,
    pub interventions: Vec<Intervention>,
    pub goal_weights: GoalWeights,
}

impl Calibration {
    /// The shipped calibration: Taurasi (AV), statistical year 2022.
    pub fn taurasi_2022() -> Self {
        taurasi::calibration()
    }

    /// Checks the internal consistency invariants. Run once at startup;
    /// a failure is fatal configuration, never recovered.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.indicators.is_empty() {
            return Err(CalibrationError::NoIndicators);
        }

        for (position, indicator) in self.indicators.iter().enumerate() {
            let expected = position as IndicatorId + 1;
            if indicator.id != expected {
                return Err(CalibrationError::IndicatorOrdering {
                    expected,
                    found: indicator.id,
                });
            }
            if indicator.min > indicator.max {
                return Err(CalibrationError::InvalidIndicatorBounds {
                    indicator: indicator.id,
                });
            }
        }

        if self.pca.loadings.len() != self.indicators.len() {
            return Err(CalibrationError::LoadingsShape {
                indicators: self.indicators.len(),
                rows: self.pca.loadings.len(),
            });
        }

        if self.benchmarks.mcei.upper <= self.benchmarks.mcei.lower {
            return Err(CalibrationError::DegenerateBenchmark { scope: "MCEI" });
        }
        for code in DomainCode::ordered() {
            if !self.indicators.iter().any(|ind| ind.domain == code) {
                return Err(CalibrationError::EmptyDomain(code));
            }
            let benchmark = self
                .benchmarks
                .domain(code)
                .ok_or(CalibrationError::MissingBenchmark(code))?;
            if benchmark.upper <= benchmark.lower {
                return Err(CalibrationError::DegenerateBenchmark { scope: code.code() });
            }
        }

        if self.interventions.len() > MAX_CATALOG_SIZE {
            return Err(CalibrationError::CatalogTooLarge {
                size: self.interventions.len(),
                max: MAX_CATALOG_SIZE,
            });
        }

        let mut seen: HashSet<InterventionId> = HashSet::new();
        for intervention in &self.interventions {
            if !seen.insert(intervention.id) {
                return Err(CalibrationError::DuplicateIntervention(intervention.id));
            }
            if !(0.0..=100.0).contains(&intervention.public_share_pct) {
                return Err(CalibrationError::InvalidPublicShare {
                    intervention: intervention.id,
                    share: intervention.public_share_pct,
                });
            }
            for rule in &intervention.impacts {
                if self.indicator_index(rule.indicator).is_none() {
                    return Err(CalibrationError::UnknownImpactIndicator {
                        intervention: intervention.id,
                        indicator: rule.indicator,
                    });
                }
            }
        }

        Ok(())
    }

    /// Position of an indicator in the calibration's id order.
    pub fn indicator_index(&self, id: IndicatorId) -> Option<usize> {
        self.indicators.iter().position(|ind| ind.id == id)
    }

    pub fn indicators_in(&self, code: DomainCode) -> impl Iterator<Item = &Indicator> {
        self.indicators.iter().filter(move |ind| ind.domain == code)
    }

    pub fn intervention(&self, id: InterventionId) -> Option<&Intervention> {
        self.interventions.iter().find(|item| item.id == id)
    }

    /// Baseline raw values in indicator-id order.
    pub fn baseline_values(&self) -> Vec<f64> {
        self.indicators.iter().map(|ind| ind.value).collect()
    }

    /// Precomputed baseline z-scores in indicator-id order.
    pub fn baseline_z_scores(&self) -> Vec<f64> {
        self.indicators.iter().map(|ind| ind.z_score).collect()
    }
}

#[derive(Debug)]
pub enum CalibrationError {
    NoIndicators,
    IndicatorOrdering {
        expected: IndicatorId,
        found: IndicatorId,
    },
    InvalidIndicatorBounds {
        indicator: IndicatorId,
    },
    LoadingsShape {
        indicators: usize,
        rows: usize,
    },
    MissingBenchmark(DomainCode),
    DegenerateBenchmark {
        scope: &'static str,
    },
    EmptyDomain(DomainCode),
    CatalogTooLarge {
        size: usize,
        max: usize,
    },
    DuplicateIntervention(InterventionId),
    InvalidPublicShare {
        intervention: InterventionId,
        share: f64,
    },
    UnknownImpactIndicator {
        intervention: InterventionId,
        indicator: IndicatorId,
    },
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::NoIndicators => {
                write!(f, "calibration carries no indicators")
            }
            CalibrationError::IndicatorOrdering { expected, found } => write!(
                f,
                "indicator ids must be contiguous from 1: expected {expected}, found {found}"
            ),
            CalibrationError::InvalidIndicatorBounds { indicator } => write!(
                f,
                "indicator {indicator} has historical min above historical max"
            ),
            CalibrationError::LoadingsShape { indicators, rows } => write!(
                f,
                "PCA loadings rows ({rows}) must match indicator count ({indicators})"
            ),
            CalibrationError::MissingBenchmark(code) => {
                write!(f, "domain {} has no normalization benchmark", code.code())
            }
            CalibrationError::DegenerateBenchmark { scope } => {
                write!(f, "benchmark for {scope} must satisfy upper > lower")
            }
            CalibrationError::EmptyDomain(code) => {
                write!(f, "domain {} aggregates no indicators", code.code())
            }
            CalibrationError::CatalogTooLarge { size, max } => write!(
                f,
                "intervention catalog of {size} exceeds the exhaustive-search bound of {max}"
            ),
            CalibrationError::DuplicateIntervention(id) => {
                write!(f, "intervention id {id} appears more than once")
            }
            CalibrationError::InvalidPublicShare {
                intervention,
                share,
            } => write!(
                f,
                "intervention {intervention} declares public share {share} outside 0-100"
            ),
            CalibrationError::UnknownImpactIndicator {
                intervention,
                indicator,
            } => write!(
                f,
                "intervention {intervention} targets unknown indicator {indicator}"
            ),
        }
    }
}

impl std::error::Error for CalibrationError {}
