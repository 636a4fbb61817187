use super::calibration::Calibration;
use super::costs::{intervention_cost_benefit, CostBenefit};
use super::domain::InterventionId;
use super::index::ScoreSnapshot;
use super::simulation::simulate;
use serde::{Deserialize, Serialize};

/// Objective function the optimizer maximizes over feasible subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    BestOverall,
    MaxEnvironmental,
    MaxSocial,
    MaxNpv,
}

impl Objective {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::BestOverall,
            Self::MaxEnvironmental,
            Self::MaxSocial,
            Self::MaxNpv,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BestOverall => "Best Overall (Goal Programming)",
            Self::MaxEnvironmental => "Max Environmental Benefits",
            Self::MaxSocial => "Max Social Benefits",
            Self::MaxNpv => "Max NPV (Economic)",
        }
    }
}

/// Catalog entry chosen by the optimizer, with its own cost-benefit.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedProject {
    pub id: InterventionId,
    pub name: &'static str,
    pub short_name: &'static str,
    pub cost_benefit: CostBenefit,
}

/// Winning portfolio for one objective at one budget.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationOutcome {
    pub objective: Objective,
    pub budget: f64,
    pub selected: Vec<SelectedProject>,
    pub totals: CostBenefit,
    pub snapshot: ScoreSnapshot,
    pub mcei_delta: f64,
}

impl OptimizationOutcome {
    pub fn selected_ids(&self) -> Vec<InterventionId> {
        self.selected.iter().map(|project| project.id).collect()
    }
}

/// Benefit sums of one subset, kept alongside its feasibility cost.
#[derive(Debug, Clone, Copy, Default)]
struct SubsetTotals {
    public_cost: i64,
    env_benefit: i64,
    soc_benefit: i64,
    npv: i64,
}

/// Exhaustively searches every subset of the intervention catalog for the
/// best feasible portfolio under the given objective.
///
/// Subsets enumerate as ascending bit masks over the catalog, which fixes
/// the tie-break: the first strictly better subset wins. A negative budget
/// leaves even the empty subset infeasible and yields the empty selection.
pub fn optimize(budget: f64, objective: Objective, calibration: &Calibration) -> OptimizationOutcome {
    let catalog = &calibration.interventions;
    let costs: Vec<CostBenefit> = catalog
        .iter()
        .map(|intervention| intervention_cost_benefit(intervention, &calibration.municipality))
        .collect();
    let subsets: u64 = 1u64 << catalog.len();

    // Pass 1: independent per-dimension maxima over feasible subsets, the
    // ideal point goal programming measures deviations against. The three
    // maxima need not come from the same subset.
    let mut ideal_env = 0i64;
    let mut ideal_soc = 0i64;
    let mut ideal_npv = 0i64;
    for mask in 0..subsets {
        let totals = subset_totals(mask, &costs);
        if totals.public_cost as f64 <= budget {
            ideal_env = ideal_env.max(totals.env_benefit);
            ideal_soc = ideal_soc.max(totals.soc_benefit);
            ideal_npv = ideal_npv.max(totals.npv);
        }
    }

    // Pass 2: score every feasible subset under the active objective.
    let weights = &calibration.goal_weights;
    let mut best: Option<(u64, f64)> = None;
    for mask in 0..subsets {
        let totals = subset_totals(mask, &costs);
        if totals.public_cost as f64 > budget {
            continue;
        }

        let value = match objective {
            Objective::MaxEnvironmental => totals.env_benefit as f64,
            Objective::MaxSocial => totals.soc_benefit as f64,
            Objective::MaxNpv => totals.npv as f64,
            Objective::BestOverall => {
                weights.environmental * relative_deviation(totals.env_benefit, ideal_env)
                    + weights.social * relative_deviation(totals.soc_benefit, ideal_soc)
                    + weights.npv * relative_deviation(totals.npv, ideal_npv)
            }
        };

        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((mask, value));
        }
    }

    let selected_ids: Vec<InterventionId> = match best {
        Some((mask, _)) => catalog
            .iter()
            .enumerate()
            .filter(|(position, _)| mask >> position & 1 == 1)
            .map(|(_, intervention)| intervention.id)
            .collect(),
        None => Vec::new(),
    };

    let selected = catalog
        .iter()
        .enumerate()
        .filter(|(_, intervention)| selected_ids.contains(&intervention.id))
        .map(|(position, intervention)| SelectedProject {
            id: intervention.id,
            name: intervention.name,
            short_name: intervention.short_name,
            cost_benefit: costs[position],
        })
        .collect();

    let simulation = simulate(&selected_ids, calibration);
    OptimizationOutcome {
        objective,
        budget,
        selected,
        totals: simulation.totals,
        snapshot: simulation.snapshot,
        mcei_delta: simulation.mcei_delta,
    }
}

/// Runs the four objectives as independent full searches at one budget, in
/// the fixed objective order. No state is shared between the searches.
pub fn optimize_all(budget: f64, calibration: &Calibration) -> Vec<OptimizationOutcome> {
    Objective::ordered()
        .into_iter()
        .map(|objective| optimize(budget, objective, calibration))
        .collect()
}

fn subset_totals(mask: u64, costs: &[CostBenefit]) -> SubsetTotals {
    let mut totals = SubsetTotals::default();
    for (position, cost) in costs.iter().enumerate() {
        if mask >> position & 1 == 1 {
            totals.public_cost += cost.public_cost;
            totals.env_benefit += cost.env_benefit;
            totals.soc_benefit += cost.soc_benefit;
            totals.npv += cost.npv;
        }
    }
    totals
}

/// Relative shortfall from the ideal: zero or negative, zero when the ideal
/// itself is zero.
fn relative_deviation(achieved: i64, ideal: i64) -> f64 {
    if ideal > 0 {
        (achieved - ideal) as f64 / ideal as f64
    } else {
        0.0
    }
}
