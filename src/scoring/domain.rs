use serde::{Deserialize, Serialize};

pub type IndicatorId = u32;
pub type InterventionId = u32;

/// Share of municipal solid waste assumed to be organic fraction.
pub const ORGANIC_FRACTION_OF_MSW: f64 = 0.35;

/// Thematic grouping an indicator contributes to. The enumeration order is
/// the canonical aggregation order for domain and index sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DomainCode {
    Ge,
    Sm,
    Brs,
    Wm,
    Cw,
    Deci,
}

impl DomainCode {
    pub const fn ordered() -> [Self; 6] {
        [Self::Ge, Self::Sm, Self::Brs, Self::Wm, Self::Cw, Self::Deci]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Ge => "GE",
            Self::Sm => "SM",
            Self::Brs => "BRS",
            Self::Wm => "WM",
            Self::Cw => "CW",
            Self::Deci => "DECI",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ge => "Green Enterprise",
            Self::Sm => "Sustainable Mobility",
            Self::Brs => "Biodiversity Resource Saving",
            Self::Wm => "Water Management",
            Self::Cw => "Collected Waste",
            Self::Deci => "Digitalization/Efficiency/Competition/Innovation",
        }
    }
}

/// Sign convention for an indicator: whether a higher raw value improves the
/// index or worsens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

impl Polarity {
    pub const fn sign(self) -> f64 {
        match self {
            Self::HigherIsBetter => 1.0,
            Self::LowerIsBetter => -1.0,
        }
    }
}

/// Municipal scale quantity an intervention's unit coefficients multiply by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Driver {
    Population,
    Msw,
    Organic,
    AgriFirms,
}

impl Driver {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Population => "inhabitants",
            Self::Msw => "tonnes of municipal solid waste",
            Self::Organic => "tonnes of organic fraction",
            Self::AgriFirms => "agricultural firms",
        }
    }
}

/// How an impact rule mutates its target indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactOp {
    Add,
    Subtract,
    Multiply,
    NewFirm,
}

/// Single declared mutation an intervention applies to an indicator.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImpactRule {
    pub indicator: IndicatorId,
    pub op: ImpactOp,
    pub magnitude: f64,
}

/// One measured statistic with its historical calibration. Baseline
/// instances are immutable; simulation derives new values elsewhere.
#[derive(Debug, Clone, Serialize)]
pub struct Indicator {
    pub id: IndicatorId,
    pub domain: DomainCode,
    pub name: &'static str,
    pub unit: &'static str,
    /// Baseline raw value for the calibrated year.
    pub value: f64,
    pub mean: f64,
    pub std_dev: f64,
    /// Baseline z-score shipped with the calibration, polarity applied.
    pub z_score: f64,
    pub polarity: Polarity,
    pub min: f64,
    pub max: f64,
}

/// Monetary coefficients per unit of the intervention's driver.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UnitCoefficients {
    pub cost: f64,
    pub revenue: f64,
    pub env_benefit: f64,
    pub soc_benefit: f64,
    pub npv: f64,
}

/// A capital project that mutates indicators and carries unit costs and
/// benefits scaled by its driver.
#[derive(Debug, Clone, Serialize)]
pub struct Intervention {
    pub id: InterventionId,
    pub name: &'static str,
    pub short_name: &'static str,
    pub description: &'static str,
    pub main_impact: &'static str,
    /// Percentage of total cost covered by public funds (0-100).
    pub public_share_pct: f64,
    pub coefficients: UnitCoefficients,
    pub driver: Driver,
    pub impacts: Vec<ImpactRule>,
}

/// Raw municipal statistics used to resolve drivers and firm ratios.
/// Never altered by simulation.
#[derive(Debug, Clone, Serialize)]
pub struct MunicipalityProfile {
    pub name: &'static str,
    pub typology: &'static str,
    pub year: u16,

    pub population: u32,
    pub population_20_64: u32,
    pub population_25_64: u32,

    /// Waste tonnages, tonnes/year.
    pub total_msw: f64,
    pub sorted_msw: f64,
    pub unsorted_msw: f64,
    pub hazardous_waste: f64,
    /// Waste service expenditures, currency/year.
    pub historical_expenditure: f64,
    pub standard_expenditure: f64,

    /// Water volumes, 1000 m3/year.
    pub water_fed: f64,
    pub water_supplied: f64,

    pub digital_services: u32,
    pub low_education_pop: u32,
    pub employed_people: u32,
    pub low_productivity_employees: u32,

    pub total_firms: u32,
    pub agri_firms_with_uaa: u32,

    pub high_emission_rate: f64,
    pub cohesion_funds: f64,
}

impl MunicipalityProfile {
    /// Resolves the scale magnitude for a driver from the profile.
    pub fn driver_value(&self, driver: Driver) -> f64 {
        match driver {
            Driver::Population => f64::from(self.population),
            Driver::Msw => self.total_msw,
            Driver::Organic => self.total_msw * ORGANIC_FRACTION_OF_MSW,
            Driver::AgriFirms => f64::from(self.agri_firms_with_uaa),
        }
    }
}

/// Theoretical worst/best raw aggregate bounds used for 0-100 normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Benchmark {
    pub lower: f64,
    pub upper: f64,
}

/// Relative weights of the goal-programming deviation terms.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GoalWeights {
    pub environmental: f64,
    pub social: f64,
    pub npv: f64,
}

impl Default for GoalWeights {
    fn default() -> Self {
        Self {
            environmental: 1.0,
            social: 2.0,
            npv: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_order_is_stable() {
        let codes: Vec<&str> = DomainCode::ordered().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec!["GE", "SM", "BRS", "WM", "CW", "DECI"]);
    }

    #[test]
    fn polarity_signs() {
        assert_eq!(Polarity::HigherIsBetter.sign(), 1.0);
        assert_eq!(Polarity::LowerIsBetter.sign(), -1.0);
    }

    #[test]
    fn organic_driver_is_a_share_of_msw() {
        let profile = profile_with_msw(1000.0);
        assert_eq!(profile.driver_value(Driver::Organic), 350.0);
        assert_eq!(profile.driver_value(Driver::Msw), 1000.0);
    }

    fn profile_with_msw(total_msw: f64) -> MunicipalityProfile {
        MunicipalityProfile {
            name: "Testborgo",
            typology: "Hill Borgo",
            year: 2022,
            population: 1000,
            population_20_64: 600,
            population_25_64: 580,
            total_msw,
            sorted_msw: 0.0,
            unsorted_msw: 0.0,
            hazardous_waste: 0.0,
            historical_expenditure: 0.0,
            standard_expenditure: 0.0,
            water_fed: 0.0,
            water_supplied: 0.0,
            digital_services: 0,
            low_education_pop: 0,
            employed_people: 0,
            low_productivity_employees: 0,
            total_firms: 100,
            agri_firms_with_uaa: 5,
            high_emission_rate: 0.0,
            cohesion_funds: 0.0,
        }
    }
}
