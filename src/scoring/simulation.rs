use super::calibration::Calibration;
use super::costs::{portfolio_totals, CostBenefit};
use super::domain::{Driver, ImpactOp, IndicatorId, InterventionId};
use super::index::{z_score, IndexEngine, ScoreSnapshot};
use serde::Serialize;
use std::collections::BTreeMap;

/// Before/after view of one indicator under a simulated scenario.
#[derive(Debug, Clone, Serialize)]
pub struct SimulatedIndicator {
    pub id: IndicatorId,
    pub name: &'static str,
    pub unit: &'static str,
    pub baseline: f64,
    pub simulated: f64,
    pub z_score: f64,
}

/// Result of simulating a selection of interventions: the re-scored index,
/// the aggregate cost-benefit of the selection, and the full indicator
/// vector it was scored from.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    pub snapshot: ScoreSnapshot,
    pub mcei_delta: f64,
    pub totals: CostBenefit,
    pub indicators: Vec<SimulatedIndicator>,
}

/// Applies the selected interventions' impact rules to the baseline
/// indicator vector and re-scores the index.
///
/// Interventions apply in catalog order regardless of selection order, so
/// any selection yields a reproducible result. An agricultural-firms
/// intervention is skipped entirely when the municipality has no such
/// firms, even if selected. New-firm impacts accumulate per target
/// indicator and resolve once at the end against the municipality's firm
/// totals, which keeps the firm ratio consistent when several interventions
/// each add firms.
pub fn simulate(selected: &[InterventionId], calibration: &Calibration) -> SimulationOutcome {
    let municipality = &calibration.municipality;
    let mut values = calibration.baseline_values();
    let mut new_firms: BTreeMap<IndicatorId, f64> = BTreeMap::new();

    for intervention in &calibration.interventions {
        if !selected.contains(&intervention.id) {
            continue;
        }
        if intervention.driver == Driver::AgriFirms && municipality.agri_firms_with_uaa == 0 {
            continue;
        }

        for rule in &intervention.impacts {
            let Some(idx) = calibration.indicator_index(rule.indicator) else {
                continue;
            };
            match rule.op {
                ImpactOp::Add => values[idx] += rule.magnitude,
                ImpactOp::Subtract => values[idx] -= rule.magnitude,
                ImpactOp::Multiply => values[idx] *= rule.magnitude,
                ImpactOp::NewFirm => {
                    *new_firms.entry(rule.indicator).or_insert(0.0) += rule.magnitude;
                }
            }
        }
    }

    // Firm-ratio indicators targeted by new_firm rules are recomputed from
    // the municipality totals, overwriting any direct mutation above.
    for (indicator_id, added) in new_firms {
        if added <= 0.0 {
            continue;
        }
        let Some(idx) = calibration.indicator_index(indicator_id) else {
            continue;
        };
        let agri = f64::from(municipality.agri_firms_with_uaa) + added;
        let total = f64::from(municipality.total_firms) + added;
        values[idx] = agri / total * 100.0;
    }

    // Only mutated indicators are re-scored, without clamping; untouched
    // ones keep the z-score shipped with the calibration.
    let mut z_scores = Vec::with_capacity(values.len());
    let mut indicators = Vec::with_capacity(values.len());
    for (indicator, &simulated) in calibration.indicators.iter().zip(values.iter()) {
        let z = if simulated != indicator.value {
            z_score(
                simulated,
                indicator.mean,
                indicator.std_dev,
                indicator.polarity,
                None,
            )
        } else {
            indicator.z_score
        };
        z_scores.push(z);
        indicators.push(SimulatedIndicator {
            id: indicator.id,
            name: indicator.name,
            unit: indicator.unit,
            baseline: indicator.value,
            simulated,
            z_score: z,
        });
    }

    let engine = IndexEngine::new(calibration);
    let snapshot = engine.snapshot_from_z(&z_scores);
    let mcei_delta = snapshot.mcei_normalized - engine.baseline_snapshot().mcei_normalized;

    SimulationOutcome {
        snapshot,
        mcei_delta,
        totals: portfolio_totals(selected, calibration),
        indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::DomainCode;

    #[test]
    fn empty_selection_reproduces_the_baseline() {
        let calibration = Calibration::taurasi_2022();
        let outcome = simulate(&[], &calibration);
        let baseline = IndexEngine::new(&calibration).baseline_snapshot();

        assert_eq!(outcome.snapshot.mcei_raw, baseline.mcei_raw);
        assert_eq!(outcome.mcei_delta, 0.0);
        assert_eq!(outcome.totals, CostBenefit::ZERO);
        assert!(outcome
            .indicators
            .iter()
            .all(|ind| ind.simulated == ind.baseline));
    }

    #[test]
    fn composting_lowers_waste_and_raises_the_index() {
        let calibration = Calibration::taurasi_2022();
        let outcome = simulate(&[1], &calibration);
        let baseline = IndexEngine::new(&calibration).baseline_snapshot();

        let msw = outcome
            .indicators
            .iter()
            .find(|ind| ind.id == 7)
            .expect("indicator 7 present");
        assert!((msw.simulated - (336.199095 - 0.13)).abs() < 1e-9);

        // Lower waste per capita with polarity -1 improves the z-score and
        // therefore the index.
        assert!(msw.z_score > -0.419414);
        assert!(outcome.snapshot.mcei_raw > baseline.mcei_raw);
        assert!(outcome.mcei_delta > 0.0);
    }

    #[test]
    fn untouched_indicators_keep_the_shipped_z_score() {
        let calibration = Calibration::taurasi_2022();
        let outcome = simulate(&[1], &calibration);

        for simulated in outcome.indicators.iter().filter(|ind| ind.id != 7) {
            let shipped = &calibration.indicators[simulated.id as usize - 1];
            assert_eq!(simulated.z_score, shipped.z_score);
        }
    }

    #[test]
    fn new_firm_impacts_recompute_the_firm_ratio_once() {
        let calibration = Calibration::taurasi_2022();
        // P4 and P5 each add one firm; the ratio resolves from the totals.
        let outcome = simulate(&[4, 5], &calibration);

        let ratio = outcome
            .indicators
            .iter()
            .find(|ind| ind.id == 1)
            .expect("indicator 1 present");
        let expected = (20.0 + 2.0) / (1030.0 + 2.0) * 100.0;
        assert!((ratio.simulated - expected).abs() < 1e-9);
    }

    #[test]
    fn zero_firm_municipality_makes_wineries_inert() {
        let mut calibration = Calibration::taurasi_2022();
        calibration.municipality.agri_firms_with_uaa = 0;

        let outcome = simulate(&[6], &calibration);
        let baseline = IndexEngine::new(&calibration).baseline_snapshot();

        assert!(outcome
            .indicators
            .iter()
            .all(|ind| ind.simulated == ind.baseline));
        assert_eq!(outcome.snapshot.mcei_raw, baseline.mcei_raw);
        assert_eq!(outcome.totals, CostBenefit::ZERO);
    }

    #[test]
    fn water_multipliers_touch_only_the_water_domain() {
        let calibration = Calibration::taurasi_2022();
        let outcome = simulate(&[2], &calibration);
        let baseline = IndexEngine::new(&calibration).baseline_snapshot();

        for (simulated, shipped) in outcome.indicators.iter().zip(&calibration.indicators) {
            if shipped.domain == DomainCode::Wm {
                assert!((simulated.simulated - shipped.value * 0.4).abs() < 1e-9);
            } else {
                assert_eq!(simulated.simulated, shipped.value);
            }
        }

        let wm = outcome
            .snapshot
            .domain(DomainCode::Wm)
            .expect("WM domain scored");
        let wm_baseline = baseline.domain(DomainCode::Wm).expect("WM baseline");
        assert_ne!(wm.raw, wm_baseline.raw);
    }
}
