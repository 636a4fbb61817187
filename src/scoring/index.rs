use super::calibration::{Calibration, PCA_COMPONENTS};
use super::domain::{DomainCode, Polarity};
use serde::Serialize;

/// Standard deviations this small are treated as degenerate calibration and
/// z-score to 0 instead of dividing.
pub const STD_EPSILON: f64 = 1e-7;

/// Hard cap on clamped z-scores, the theoretical bound implied by the
/// calibration.
pub const Z_SCORE_CAP: f64 = 6.0;

/// Polarity-signed standard score of a raw indicator value.
///
/// Clamping to the historical bounds (and the +/-6 cap that comes with it)
/// is caller policy: the manual what-if path requests it, intervention
/// simulation does not.
pub fn z_score(
    value: f64,
    mean: f64,
    std_dev: f64,
    polarity: Polarity,
    clamp_bounds: Option<(f64, f64)>,
) -> f64 {
    if std_dev < STD_EPSILON {
        return 0.0;
    }

    match clamp_bounds {
        Some((min, max)) => {
            let z = polarity.sign() * (value.clamp(min, max) - mean) / std_dev;
            z.clamp(-Z_SCORE_CAP, Z_SCORE_CAP)
        }
        None => polarity.sign() * (value - mean) / std_dev,
    }
}

/// Weighted contribution of one indicator: z times the loadings row, each
/// component weighted by its explained variance percentage.
pub fn indicator_contribution(
    z: f64,
    loadings: &[f64; PCA_COMPONENTS],
    variance: &[f64; PCA_COMPONENTS],
) -> f64 {
    loadings
        .iter()
        .zip(variance.iter())
        .map(|(loading, var)| z * loading * var)
        .sum()
}

/// Min-max rescaling to the 0-100 range. Deliberately not clipped: values
/// outside the historical [lower, upper] envelope legitimately map below 0
/// or above 100.
pub fn normalize(raw: f64, lower: f64, upper: f64) -> f64 {
    (raw - lower) / (upper - lower) * 100.0
}

/// Raw and normalized score of one domain.
#[derive(Debug, Clone, Serialize)]
pub struct DomainScore {
    pub domain: DomainCode,
    pub label: &'static str,
    pub raw: f64,
    pub normalized: f64,
}

/// Domain scores plus the composite index, raw and normalized. Produced
/// fresh for every evaluated indicator vector.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSnapshot {
    pub domains: Vec<DomainScore>,
    pub mcei_raw: f64,
    pub mcei_normalized: f64,
}

impl ScoreSnapshot {
    pub fn domain(&self, code: DomainCode) -> Option<&DomainScore> {
        self.domains.iter().find(|score| score.domain == code)
    }
}

/// Aggregates z-score vectors into domain scores and the composite index
/// against one calibration.
pub struct IndexEngine<'a> {
    calibration: &'a Calibration,
}

impl<'a> IndexEngine<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self { calibration }
    }

    /// Snapshot for the calibrated baseline, using the precomputed z-scores
    /// shipped with the indicators.
    pub fn baseline_snapshot(&self) -> ScoreSnapshot {
        self.snapshot_from_z(&self.calibration.baseline_z_scores())
    }

    /// Snapshot for an arbitrary z-score vector in indicator-id order.
    ///
    /// Summation order is fixed (ascending indicator id within a domain,
    /// domains in enumeration order) so results are bit-for-bit
    /// reproducible.
    pub fn snapshot_from_z(&self, z_scores: &[f64]) -> ScoreSnapshot {
        let pca = &self.calibration.pca;
        let mut mcei_raw = 0.0;
        let mut raw_scores = Vec::with_capacity(DomainCode::ordered().len());

        for code in DomainCode::ordered() {
            let mut raw = 0.0;
            for indicator in self.calibration.indicators_in(code) {
                let idx = indicator.id as usize - 1;
                if let (Some(z), Some(loadings)) = (z_scores.get(idx), pca.loadings.get(idx)) {
                    raw += indicator_contribution(*z, loadings, &pca.variance);
                }
            }
            mcei_raw += raw;
            raw_scores.push((code, raw));
        }

        let domains = raw_scores
            .into_iter()
            .filter_map(|(code, raw)| {
                self.calibration
                    .benchmarks
                    .domain(code)
                    .map(|bench| DomainScore {
                        domain: code,
                        label: code.label(),
                        raw,
                        normalized: normalize(raw, bench.lower, bench.upper),
                    })
            })
            .collect();

        let mcei = self.calibration.benchmarks.mcei;
        ScoreSnapshot {
            domains,
            mcei_raw,
            mcei_normalized: normalize(mcei_raw, mcei.lower, mcei.upper),
        }
    }
}
