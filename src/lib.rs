//! Composite circularity scoring and intervention planning for a single
//! municipality: indicator z-scores aggregate through fixed PCA weights into
//! domain scores and the MCEI, interventions mutate the indicator vector, and
//! an exhaustive optimizer selects the budget-feasible intervention portfolio
//! for a chosen objective.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
