use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use mcei_planner::config::AppConfig;
use mcei_planner::error::AppError;
use mcei_planner::scoring::calibration::Calibration;
use mcei_planner::scoring::overrides::{what_if, OverrideSet, WhatIfOutcome};
use mcei_planner::scoring::router::{planner_router, PlannerState};
use mcei_planner::scoring::{
    optimize, optimize_all, simulate, CostBenefit, IndexEngine, Objective, OptimizationOutcome,
    ScoreSnapshot, SimulationOutcome,
};
use mcei_planner::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct OpsState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "MCEI Planner",
    about = "Score the Municipal Circular Economy Index and plan intervention portfolios from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the baseline index for the calibrated municipality
    Baseline(BaselineArgs),
    /// Re-score the index with a chosen set of interventions applied
    Simulate(SimulateArgs),
    /// Select the budget-feasible intervention portfolio for an objective
    Optimize(OptimizeArgs),
    /// Re-score the index from manually supplied indicator values
    WhatIf(WhatIfArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct BaselineArgs {
    /// Include the full indicator listing in the output
    #[arg(long)]
    list_indicators: bool,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Intervention ids to apply, comma separated (e.g. 1,3,5)
    #[arg(long, value_delimiter = ',', required = true)]
    interventions: Vec<u32>,
    /// Include the indicators the selection changed in the output
    #[arg(long)]
    list_indicators: bool,
}

#[derive(Args, Debug)]
struct OptimizeArgs {
    /// Available public budget (defaults to the configured budget)
    #[arg(long)]
    budget: Option<f64>,
    /// Objective to maximize
    #[arg(long, value_parser = parse_objective, default_value = "best_overall")]
    objective: Objective,
    /// Run all four objectives and print each result
    #[arg(long)]
    compare: bool,
}

#[derive(Args, Debug)]
struct WhatIfArgs {
    /// CSV file of indicator_id,value overrides
    #[arg(long)]
    overrides_csv: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Baseline(args) => run_baseline(args),
        Command::Simulate(args) => run_simulate(args),
        Command::Optimize(args) => run_optimize(args),
        Command::WhatIf(args) => run_what_if(args),
    }
}

fn parse_objective(raw: &str) -> Result<Objective, String> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "best_overall" => Ok(Objective::BestOverall),
        "max_environmental" => Ok(Objective::MaxEnvironmental),
        "max_social" => Ok(Objective::MaxSocial),
        "max_npv" => Ok(Objective::MaxNpv),
        other => Err(format!(
            "unknown objective '{other}' (expected best_overall, max_environmental, max_social or max_npv)"
        )),
    }
}

fn loaded_calibration() -> Result<Calibration, AppError> {
    let calibration = Calibration::taurasi_2022();
    calibration.validate()?;
    Ok(calibration)
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let calibration = Arc::new(loaded_calibration()?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let ops_state = OpsState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };
    let planner_state = PlannerState {
        calibration: calibration.clone(),
        default_budget: config.planner.default_budget,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(ops_state)
        .merge(planner_router(planner_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        municipality = calibration.municipality.name,
        "circularity planner ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_baseline(args: BaselineArgs) -> Result<(), AppError> {
    let calibration = loaded_calibration()?;
    let snapshot = IndexEngine::new(&calibration).baseline_snapshot();

    println!(
        "Baseline index for {} ({}, {})",
        calibration.municipality.name,
        calibration.municipality.typology,
        calibration.municipality.year
    );
    render_snapshot(&snapshot);

    if args.list_indicators {
        println!("\nIndicators");
        for indicator in &calibration.indicators {
            println!(
                "- #{} [{}] {}: {:.6} {} (z {:.6})",
                indicator.id,
                indicator.domain.code(),
                indicator.name,
                indicator.value,
                indicator.unit,
                indicator.z_score
            );
        }
    }

    Ok(())
}

fn run_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let calibration = loaded_calibration()?;
    let outcome = simulate(&args.interventions, &calibration);

    println!("Simulated interventions: {:?}", args.interventions);
    render_simulation(&outcome, args.list_indicators);
    Ok(())
}

fn run_optimize(args: OptimizeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let calibration = loaded_calibration()?;
    let budget = args.budget.unwrap_or(config.planner.default_budget);

    if args.compare {
        for outcome in optimize_all(budget, &calibration) {
            render_optimization(&outcome);
            println!();
        }
    } else {
        render_optimization(&optimize(budget, args.objective, &calibration));
    }

    Ok(())
}

fn run_what_if(args: WhatIfArgs) -> Result<(), AppError> {
    let calibration = loaded_calibration()?;
    let overrides = OverrideSet::from_path(&args.overrides_csv)?;
    let outcome = what_if(&overrides, &calibration)?;

    println!(
        "What-if scenario from {} ({} override(s))",
        args.overrides_csv.display(),
        overrides.len()
    );
    render_what_if(&outcome);
    Ok(())
}

fn render_snapshot(snapshot: &ScoreSnapshot) {
    println!("\nDomain scores (0-100)");
    for domain in &snapshot.domains {
        println!(
            "- {} ({}): {:.2} (raw {:.4})",
            domain.label,
            domain.domain.code(),
            domain.normalized,
            domain.raw
        );
    }
    println!(
        "\nMCEI: {:.2} (raw {:.4})",
        snapshot.mcei_normalized, snapshot.mcei_raw
    );
}

fn render_simulation(outcome: &SimulationOutcome, list_indicators: bool) {
    render_snapshot(&outcome.snapshot);
    println!("MCEI delta vs baseline: {:+.4}", outcome.mcei_delta);

    println!("\nPortfolio totals");
    render_totals(&outcome.totals);

    if list_indicators {
        let changed: Vec<_> = outcome
            .indicators
            .iter()
            .filter(|ind| ind.simulated != ind.baseline)
            .collect();
        if changed.is_empty() {
            println!("\nChanged indicators: none");
        } else {
            println!("\nChanged indicators");
            for indicator in changed {
                println!(
                    "- #{} {}: {:.6} -> {:.6} {} (z {:.6})",
                    indicator.id,
                    indicator.name,
                    indicator.baseline,
                    indicator.simulated,
                    indicator.unit,
                    indicator.z_score
                );
            }
        }
    }
}

fn render_optimization(outcome: &OptimizationOutcome) {
    println!(
        "Objective: {} | Budget: {:.0}",
        outcome.objective.label(),
        outcome.budget
    );

    if outcome.selected.is_empty() {
        println!("Budget insufficient for any intervention");
    } else {
        println!("Selected projects");
        for project in &outcome.selected {
            println!(
                "- {} {} (public cost {}, NPV {})",
                project.short_name,
                project.name,
                project.cost_benefit.public_cost,
                project.cost_benefit.npv
            );
        }
    }

    println!("\nPortfolio totals");
    render_totals(&outcome.totals);
    println!(
        "MCEI: {:.2} ({:+.4} vs baseline)",
        outcome.snapshot.mcei_normalized, outcome.mcei_delta
    );
}

fn render_what_if(outcome: &WhatIfOutcome) {
    render_snapshot(&outcome.snapshot);
    println!("MCEI delta vs baseline: {:+.4}", outcome.mcei_delta);
}

fn render_totals(totals: &CostBenefit) {
    println!("- Total cost: {}", totals.total_cost);
    println!("- Public cost: {}", totals.public_cost);
    println!("- Private cost: {}", totals.private_cost);
    println!("- Revenue: {}", totals.revenue);
    println!("- Environmental benefit: {}", totals.env_benefit);
    println!("- Social benefit: {}", totals.soc_benefit);
    println!("- NPV: {}", totals.npv);
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
