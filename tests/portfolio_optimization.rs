//! End-to-end optimizer behavior on the shipped calibration: feasibility,
//! optimality against an independent search, and the documented picks at
//! the default planning budget.

use mcei_planner::scoring::calibration::Calibration;
use mcei_planner::scoring::{
    intervention_cost_benefit, optimize, optimize_all, CostBenefit, Objective,
};

const DEFAULT_BUDGET: f64 = 230_000.0;

#[test]
fn all_four_objectives_return_feasible_portfolios_at_the_default_budget() {
    let calibration = Calibration::taurasi_2022();
    let outcomes = optimize_all(DEFAULT_BUDGET, &calibration);

    assert_eq!(outcomes.len(), 4);
    for outcome in &outcomes {
        assert!(
            outcome.totals.public_cost as f64 <= DEFAULT_BUDGET,
            "{:?} exceeded the budget",
            outcome.objective
        );
        assert!(!outcome.selected.is_empty());
    }
}

#[test]
fn default_budget_picks_match_the_catalog_economics() {
    let calibration = Calibration::taurasi_2022();

    // Only single interventions fit under 230k public cost. The E-waste
    // Hub dominates both benefit dimensions; Community Composting has the
    // best NPV.
    let npv = optimize(DEFAULT_BUDGET, Objective::MaxNpv, &calibration);
    assert_eq!(npv.selected_ids(), vec![1]);

    let env = optimize(DEFAULT_BUDGET, Objective::MaxEnvironmental, &calibration);
    assert_eq!(env.selected_ids(), vec![5]);

    let soc = optimize(DEFAULT_BUDGET, Objective::MaxSocial, &calibration);
    assert_eq!(soc.selected_ids(), vec![5]);

    let overall = optimize(DEFAULT_BUDGET, Objective::BestOverall, &calibration);
    assert_eq!(overall.selected_ids(), vec![5]);
}

#[test]
fn zero_budget_returns_the_empty_portfolio() {
    let calibration = Calibration::taurasi_2022();
    for objective in Objective::ordered() {
        let outcome = optimize(0.0, objective, &calibration);
        assert!(outcome.selected.is_empty());
        assert_eq!(outcome.totals, CostBenefit::ZERO);
        // Empty selection re-scores to the baseline.
        assert_eq!(outcome.mcei_delta, 0.0);
    }
}

#[test]
fn no_unselected_feasible_subset_beats_the_winner() {
    let calibration = Calibration::taurasi_2022();
    let costs: Vec<CostBenefit> = calibration
        .interventions
        .iter()
        .map(|intervention| intervention_cost_benefit(intervention, &calibration.municipality))
        .collect();

    for budget in [180_000.0, 380_000.0, 1_500_000.0] {
        let outcome = optimize(budget, Objective::MaxNpv, &calibration);
        let winner = outcome.totals.npv;

        // Independent recursive enumeration, no bit masks involved.
        let mut best_by_recursion = i64::MIN;
        enumerate(&costs, 0, 0, 0, budget, &mut best_by_recursion);
        assert_eq!(winner, best_by_recursion, "budget {budget}");
    }
}

fn enumerate(
    costs: &[CostBenefit],
    index: usize,
    public_cost: i64,
    npv: i64,
    budget: f64,
    best: &mut i64,
) {
    if index == costs.len() {
        if public_cost as f64 <= budget && npv > *best {
            *best = npv;
        }
        return;
    }
    enumerate(costs, index + 1, public_cost, npv, budget, best);
    enumerate(
        costs,
        index + 1,
        public_cost + costs[index].public_cost,
        npv + costs[index].npv,
        budget,
        best,
    );
}

#[test]
fn growing_the_budget_never_hurts_any_objective() {
    let calibration = Calibration::taurasi_2022();
    let budgets = [
        0.0,
        120_000.0,
        DEFAULT_BUDGET,
        500_000.0,
        2_000_000.0,
        10_000_000.0,
    ];

    for objective in [
        Objective::MaxEnvironmental,
        Objective::MaxSocial,
        Objective::MaxNpv,
    ] {
        let mut previous = i64::MIN;
        for budget in budgets {
            let outcome = optimize(budget, objective, &calibration);
            let achieved = match objective {
                Objective::MaxEnvironmental => outcome.totals.env_benefit,
                Objective::MaxSocial => outcome.totals.soc_benefit,
                Objective::MaxNpv => outcome.totals.npv,
                Objective::BestOverall => unreachable!("not part of this check"),
            };
            assert!(
                achieved >= previous,
                "{objective:?} lost value when the budget grew to {budget}"
            );
            previous = achieved;
        }
    }
}

#[test]
fn inert_wineries_never_enter_a_portfolio_effectively() {
    let mut calibration = Calibration::taurasi_2022();
    calibration.municipality.agri_firms_with_uaa = 0;

    // With the firm count at zero the wineries cost nothing and yield
    // nothing, so even an enormous budget gains nothing from them.
    let outcome = optimize(50_000_000.0, Objective::MaxNpv, &calibration);
    let without_wineries: Vec<u32> = outcome
        .selected_ids()
        .into_iter()
        .filter(|id| *id != 6)
        .collect();

    let totals_without = mcei_planner::scoring::portfolio_totals(&without_wineries, &calibration);
    assert_eq!(outcome.totals.npv, totals_without.npv);
    assert_eq!(outcome.totals.public_cost, totals_without.public_cost);
}
