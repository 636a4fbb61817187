use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::calibration::Calibration;
use super::costs::{intervention_cost_benefit, CostBenefit};
use super::domain::{Driver, Indicator, IndicatorId, InterventionId, MunicipalityProfile};
use super::index::{IndexEngine, ScoreSnapshot};
use super::optimizer::{optimize, optimize_all, Objective, OptimizationOutcome};
use super::overrides::{what_if, OverrideSet, WhatIfOutcome};
use super::simulation::{simulate, SimulationOutcome};
use crate::error::AppError;

/// Shared immutable state behind the planner endpoints. Every request
/// computes against the same validated calibration.
#[derive(Clone)]
pub struct PlannerState {
    pub calibration: Arc<Calibration>,
    pub default_budget: f64,
}

/// Router builder exposing the scoring and optimization endpoints.
pub fn planner_router(state: PlannerState) -> Router {
    Router::new()
        .route("/api/v1/index/baseline", get(baseline_handler))
        .route("/api/v1/interventions", get(interventions_handler))
        .route("/api/v1/simulate", post(simulate_handler))
        .route("/api/v1/optimize", post(optimize_handler))
        .route("/api/v1/optimize/compare", post(compare_handler))
        .route("/api/v1/what-if", post(what_if_handler))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct BaselineResponse {
    municipality: MunicipalityProfile,
    snapshot: ScoreSnapshot,
    indicators: Vec<Indicator>,
}

#[derive(Debug, Serialize)]
struct InterventionView {
    id: InterventionId,
    name: &'static str,
    short_name: &'static str,
    description: &'static str,
    main_impact: &'static str,
    driver: Driver,
    driver_label: &'static str,
    public_share_pct: f64,
    cost_benefit: CostBenefit,
}

#[derive(Debug, Deserialize)]
struct SimulateRequest {
    interventions: Vec<InterventionId>,
}

#[derive(Debug, Deserialize)]
struct OptimizeRequest {
    #[serde(default)]
    budget: Option<f64>,
    objective: Objective,
}

#[derive(Debug, Deserialize)]
struct CompareRequest {
    #[serde(default)]
    budget: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OverrideEntry {
    indicator: IndicatorId,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct WhatIfRequest {
    values: Vec<OverrideEntry>,
}

async fn baseline_handler(State(state): State<PlannerState>) -> Json<BaselineResponse> {
    let calibration = &state.calibration;
    Json(BaselineResponse {
        municipality: calibration.municipality.clone(),
        snapshot: IndexEngine::new(calibration).baseline_snapshot(),
        indicators: calibration.indicators.clone(),
    })
}

async fn interventions_handler(State(state): State<PlannerState>) -> Json<Vec<InterventionView>> {
    let calibration = &state.calibration;
    let views = calibration
        .interventions
        .iter()
        .map(|intervention| InterventionView {
            id: intervention.id,
            name: intervention.name,
            short_name: intervention.short_name,
            description: intervention.description,
            main_impact: intervention.main_impact,
            driver: intervention.driver,
            driver_label: intervention.driver.label(),
            public_share_pct: intervention.public_share_pct,
            cost_benefit: intervention_cost_benefit(intervention, &calibration.municipality),
        })
        .collect();
    Json(views)
}

async fn simulate_handler(
    State(state): State<PlannerState>,
    Json(payload): Json<SimulateRequest>,
) -> Json<SimulationOutcome> {
    Json(simulate(&payload.interventions, &state.calibration))
}

async fn optimize_handler(
    State(state): State<PlannerState>,
    Json(payload): Json<OptimizeRequest>,
) -> Json<OptimizationOutcome> {
    let budget = payload.budget.unwrap_or(state.default_budget);
    Json(optimize(budget, payload.objective, &state.calibration))
}

async fn compare_handler(
    State(state): State<PlannerState>,
    Json(payload): Json<CompareRequest>,
) -> Json<Vec<OptimizationOutcome>> {
    let budget = payload.budget.unwrap_or(state.default_budget);
    Json(optimize_all(budget, &state.calibration))
}

async fn what_if_handler(
    State(state): State<PlannerState>,
    Json(payload): Json<WhatIfRequest>,
) -> Result<Json<WhatIfOutcome>, AppError> {
    let overrides = OverrideSet::from_pairs(
        payload
            .values
            .iter()
            .map(|entry| (entry.indicator, entry.value)),
    );

    let outcome = what_if(&overrides, &state.calibration)?;
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PlannerState {
        PlannerState {
            calibration: Arc::new(Calibration::taurasi_2022()),
            default_budget: 230_000.0,
        }
    }

    #[tokio::test]
    async fn baseline_handler_reports_all_indicators() {
        let Json(body) = baseline_handler(State(state())).await;
        assert_eq!(body.indicators.len(), 17);
        assert_eq!(body.snapshot.domains.len(), 6);
        assert_eq!(body.municipality.name, "Taurasi");
    }

    #[tokio::test]
    async fn optimize_handler_defaults_the_budget() {
        let request = OptimizeRequest {
            budget: None,
            objective: Objective::MaxNpv,
        };
        let Json(body) = optimize_handler(State(state()), Json(request)).await;
        assert_eq!(body.budget, 230_000.0);
        assert!(!body.selected.is_empty());
    }

    #[tokio::test]
    async fn what_if_handler_rejects_unknown_indicators() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let request = WhatIfRequest {
            values: vec![OverrideEntry {
                indicator: 404,
                value: 1.0,
            }],
        };
        let err = what_if_handler(State(state()), Json(request))
            .await
            .expect_err("unknown indicator rejected");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
