//! Scoring-pipeline properties checked against the shipped Taurasi
//! calibration.

use mcei_planner::scoring::calibration::Calibration;
use mcei_planner::scoring::domain::DomainCode;
use mcei_planner::scoring::{normalize, z_score, IndexEngine};

#[test]
fn shipped_msw_z_score_matches_the_calibration() {
    let calibration = Calibration::taurasi_2022();
    let msw = &calibration.indicators[6];
    assert_eq!(msw.id, 7);

    let z = z_score(msw.value, msw.mean, msw.std_dev, msw.polarity, None);
    assert!(
        (z - (-0.419414)).abs() < 1e-5,
        "recomputed z {z} drifted from the shipped value"
    );
    assert!((z - msw.z_score).abs() < 1e-5);
}

#[test]
fn every_benchmark_anchors_normalization_at_its_bounds() {
    let calibration = Calibration::taurasi_2022();

    let mcei = calibration.benchmarks.mcei;
    assert_eq!(normalize(mcei.lower, mcei.lower, mcei.upper), 0.0);
    assert_eq!(normalize(mcei.upper, mcei.lower, mcei.upper), 100.0);

    for code in DomainCode::ordered() {
        let bench = calibration
            .benchmarks
            .domain(code)
            .expect("benchmark present for every domain");
        assert_eq!(normalize(bench.lower, bench.lower, bench.upper), 0.0);
        assert_eq!(normalize(bench.upper, bench.lower, bench.upper), 100.0);
    }
}

#[test]
fn baseline_composite_is_the_sum_of_domain_scores() {
    let calibration = Calibration::taurasi_2022();
    let snapshot = IndexEngine::new(&calibration).baseline_snapshot();

    assert_eq!(snapshot.domains.len(), 6);
    let summed: f64 = snapshot.domains.iter().map(|domain| domain.raw).sum();
    assert!((snapshot.mcei_raw - summed).abs() < 1e-9);
}

#[test]
fn domains_report_in_enumeration_order() {
    let calibration = Calibration::taurasi_2022();
    let snapshot = IndexEngine::new(&calibration).baseline_snapshot();

    let reported: Vec<DomainCode> = snapshot.domains.iter().map(|d| d.domain).collect();
    assert_eq!(reported, DomainCode::ordered().to_vec());
}

#[test]
fn baseline_scoring_is_bit_for_bit_reproducible() {
    let calibration = Calibration::taurasi_2022();
    let engine = IndexEngine::new(&calibration);
    let first = engine.baseline_snapshot();
    let second = engine.baseline_snapshot();

    assert_eq!(first.mcei_raw.to_bits(), second.mcei_raw.to_bits());
    assert_eq!(
        first.mcei_normalized.to_bits(),
        second.mcei_normalized.to_bits()
    );
    for (a, b) in first.domains.iter().zip(second.domains.iter()) {
        assert_eq!(a.raw.to_bits(), b.raw.to_bits());
        assert_eq!(a.normalized.to_bits(), b.normalized.to_bits());
    }
}
