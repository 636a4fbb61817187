pub mod calibration;
pub mod domain;
pub mod overrides;
pub mod router;

mod costs;
mod index;
mod optimizer;
mod simulation;

pub use costs::{intervention_cost_benefit, portfolio_totals, CostBenefit};
pub use index::{
    indicator_contribution, normalize, z_score, DomainScore, IndexEngine, ScoreSnapshot,
    Z_SCORE_CAP,
};
pub use optimizer::{optimize, optimize_all, Objective, OptimizationOutcome, SelectedProject};
pub use simulation::{simulate, SimulatedIndicator, SimulationOutcome};
