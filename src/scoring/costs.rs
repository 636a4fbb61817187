use super::calibration::Calibration;
use super::domain::{Driver, Intervention, InterventionId, MunicipalityProfile};
use serde::Serialize;

/// Monetary outcome of an intervention (or a portfolio), in whole currency
/// units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CostBenefit {
    pub total_cost: i64,
    pub public_cost: i64,
    pub private_cost: i64,
    pub revenue: i64,
    pub env_benefit: i64,
    pub soc_benefit: i64,
    pub npv: i64,
}

impl CostBenefit {
    pub const ZERO: Self = Self {
        total_cost: 0,
        public_cost: 0,
        private_cost: 0,
        revenue: 0,
        env_benefit: 0,
        soc_benefit: 0,
        npv: 0,
    };

    pub fn accumulate(&mut self, other: &CostBenefit) {
        self.total_cost += other.total_cost;
        self.public_cost += other.public_cost;
        self.private_cost += other.private_cost;
        self.revenue += other.revenue;
        self.env_benefit += other.env_benefit;
        self.soc_benefit += other.soc_benefit;
        self.npv += other.npv;
    }
}

/// Scales an intervention's unit coefficients by its resolved driver.
///
/// An agricultural-firms intervention in a municipality with zero such
/// firms is a valid degenerate case and costs nothing. Each monetary output
/// rounds independently from the unrounded intermediates, so the public and
/// private parts are never derived from an already-rounded total.
pub fn intervention_cost_benefit(
    intervention: &Intervention,
    municipality: &MunicipalityProfile,
) -> CostBenefit {
    let driver = municipality.driver_value(intervention.driver);

    if intervention.driver == Driver::AgriFirms && driver == 0.0 {
        return CostBenefit::ZERO;
    }

    let coefficients = &intervention.coefficients;
    let total_cost = coefficients.cost * driver;
    let public_cost = total_cost * intervention.public_share_pct / 100.0;
    let private_cost = total_cost - public_cost;

    CostBenefit {
        total_cost: total_cost.round() as i64,
        public_cost: public_cost.round() as i64,
        private_cost: private_cost.round() as i64,
        revenue: (coefficients.revenue * driver).round() as i64,
        env_benefit: (coefficients.env_benefit * driver).round() as i64,
        soc_benefit: (coefficients.soc_benefit * driver).round() as i64,
        npv: (coefficients.npv * driver).round() as i64,
    }
}

/// Aggregate cost-benefit of the selected interventions, accumulated in
/// catalog order.
pub fn portfolio_totals(selected: &[InterventionId], calibration: &Calibration) -> CostBenefit {
    let mut totals = CostBenefit::ZERO;
    for intervention in &calibration.interventions {
        if selected.contains(&intervention.id) {
            totals.accumulate(&intervention_cost_benefit(
                intervention,
                &calibration.municipality,
            ));
        }
    }
    totals
}
