use super::{Benchmarks, Calibration, PcaModel};
use crate::scoring::domain::{
    Benchmark, DomainCode, Driver, GoalWeights, ImpactOp, ImpactRule, Indicator, Intervention,
    MunicipalityProfile, Polarity, UnitCoefficients,
};
use std::collections::HashMap;

pub(super) fn calibration() -> Calibration {
    Calibration {
        municipality: municipality(),
        indicators: indicators(),
        pca: pca_model(),
        benchmarks: benchmarks(),
        interventions: interventions(),
        goal_weights: GoalWeights {
            environmental: 1.0,
            social: 2.0,
            npv: 2.0,
        },
    }
}

fn municipality() -> MunicipalityProfile {
    MunicipalityProfile {
        name: "Taurasi",
        typology: "Hill Borgo",
        year: 2022,

        population: 2210,
        population_20_64: 1348,
        population_25_64: 1326,

        total_msw: 743.0,
        sorted_msw: 505.0,
        unsorted_msw: 239.0,
        hazardous_waste: 14.0,
        historical_expenditure: 465_757.0,
        standard_expenditure: 327_994.0,

        water_fed: 335.0,
        water_supplied: 100.0,

        digital_services: 3,
        low_education_pop: 395,
        employed_people: 683,
        low_productivity_employees: 19,

        total_firms: 1030,
        agri_firms_with_uaa: 20,

        high_emission_rate: 25.97,
        cohesion_funds: 0.0,
    }
}

fn indicators() -> Vec<Indicator> {
    vec![
        Indicator {
            id: 1,
            domain: DomainCode::Ge,
            name: "Agricultural firms with UAA / total firms",
            unit: "%",
            value: 1.941748, // (20/1030)*100
            mean: 2.068023,
            std_dev: 0.103416,
            z_score: -1.221045,
            polarity: Polarity::HigherIsBetter,
            min: 1.941748,
            max: 2.200957,
        },
        Indicator {
            id: 2,
            domain: DomainCode::Sm,
            name: "High emission motorisation rate",
            unit: "%",
            value: 25.97,
            mean: 22.764167,
            std_dev: 11.237664,
            z_score: -0.285276,
            polarity: Polarity::LowerIsBetter,
            min: 0.0,
            max: 29.63,
        },
        Indicator {
            id: 3,
            domain: DomainCode::Brs,
            name: "Cohesion funds for environmental projects",
            unit: "EUR/inhabitant",
            value: 0.0,
            mean: 286.023822,
            std_dev: 601.740422,
            z_score: -0.475328,
            polarity: Polarity::HigherIsBetter,
            min: 0.0,
            max: 1361.122222,
        },
        Indicator {
            id: 4,
            domain: DomainCode::Wm,
            name: "Water input per capita",
            unit: "1000 m3/inhabitant",
            value: 0.151584, // 335/2210
            mean: 0.148779,
            std_dev: 0.002638,
            z_score: -1.0631,
            polarity: Polarity::LowerIsBetter,
            min: 0.145413,
            max: 0.151584,
        },
        Indicator {
            id: 5,
            domain: DomainCode::Wm,
            name: "Supplied water per capita",
            unit: "1000 m3/inhabitant",
            value: 0.045249, // 100/2210
            mean: 0.0445,
            std_dev: 0.000688,
            z_score: -1.089341,
            polarity: Polarity::LowerIsBetter,
            min: 0.043578,
            max: 0.045249,
        },
        Indicator {
            id: 6,
            domain: DomainCode::Wm,
            name: "Water leaks",
            unit: "ratio",
            value: 0.701493, // (335-100)/335
            mean: 0.700891,
            std_dev: 0.00086,
            z_score: -0.699336,
            polarity: Polarity::LowerIsBetter,
            min: 0.7,
            max: 0.702065,
        },
        Indicator {
            id: 7,
            domain: DomainCode::Cw,
            name: "MSW per capita",
            unit: "kg/inhabitant/year",
            value: 336.199095, // 743/2.210 * 1000
            mean: 330.389081,
            std_dev: 13.852706,
            z_score: -0.419414,
            polarity: Polarity::LowerIsBetter,
            min: 315.137615,
            max: 349.333333,
        },
        Indicator {
            id: 8,
            domain: DomainCode::Cw,
            name: "MSW sorted / MSW",
            unit: "%",
            value: 67.967699, // 505/743 * 100
            mean: 67.674634,
            std_dev: 0.415852,
            z_score: 0.704733,
            polarity: Polarity::HigherIsBetter,
            min: 67.248908,
            max: 68.235294,
        },
        Indicator {
            id: 9,
            domain: DomainCode::Cw,
            name: "Sorted MSW per capita",
            unit: "kg/inhabitant/year",
            value: 228.506787, // 505/2.210 * 1000
            mean: 223.611316,
            std_dev: 10.064476,
            z_score: 0.486411,
            polarity: Polarity::HigherIsBetter,
            min: 211.926606,
            max: 236.0,
        },
        Indicator {
            id: 10,
            domain: DomainCode::Cw,
            name: "Unsorted MSW per capita",
            unit: "kg/inhabitant/year",
            value: 108.144796, // 239/2.210 * 1000
            mean: 106.689563,
            std_dev: 4.217835,
            z_score: -0.345019,
            polarity: Polarity::LowerIsBetter,
            min: 102.752294,
            max: 113.333333,
        },
        Indicator {
            id: 11,
            domain: DomainCode::Cw,
            name: "Collected hazardous waste",
            unit: "kg/inhabitant/year",
            value: 6.334842, // 14/2.210 * 1000
            mean: 8.029456,
            std_dev: 1.32589,
            z_score: 1.278096,
            polarity: Polarity::LowerIsBetter,
            min: 6.334842,
            max: 10.0,
        },
        Indicator {
            id: 12,
            domain: DomainCode::Cw,
            name: "Per capita historical expenditure for waste",
            unit: "EUR/inhabitant",
            value: 210.749774, // 465757/2210
            mean: 207.401387,
            std_dev: 6.087996,
            z_score: 0.549998,
            polarity: Polarity::HigherIsBetter,
            min: 200.154128,
            max: 214.588,
        },
        Indicator {
            id: 13,
            domain: DomainCode::Cw,
            name: "Per capita standard expenditure for waste",
            unit: "EUR/inhabitant",
            value: 148.413575, // 327994/2210
            mean: 140.880187,
            std_dev: 10.464623,
            z_score: 0.719891,
            polarity: Polarity::HigherIsBetter,
            min: 126.850917,
            max: 152.029333,
        },
        Indicator {
            id: 14,
            domain: DomainCode::Deci,
            name: "Accessibility of local government digital properties",
            unit: "number",
            value: 3.0,
            mean: 0.75,
            std_dev: 1.38873,
            z_score: 1.620185,
            polarity: Polarity::HigherIsBetter,
            min: 0.0,
            max: 3.0,
        },
        Indicator {
            id: 15,
            domain: DomainCode::Deci,
            name: "Population 25-64 with low education",
            unit: "%",
            value: 29.788839, // 395/1326 * 100
            mean: 30.177511,
            std_dev: 0.405766,
            z_score: 0.957874,
            polarity: Polarity::LowerIsBetter,
            min: 29.777778,
            max: 30.657492,
        },
        Indicator {
            id: 16,
            domain: DomainCode::Deci,
            name: "Employment rate (20-64)",
            unit: "%",
            value: 50.667656, // 683/1348 * 100
            mean: 49.208315,
            std_dev: 1.794727,
            z_score: 0.813127,
            polarity: Polarity::HigherIsBetter,
            min: 46.35064,
            max: 50.667656,
        },
        Indicator {
            id: 17,
            domain: DomainCode::Deci,
            name: "Low-productivity employees",
            unit: "ventile",
            value: 19.0,
            mean: 16.083333,
            std_dev: 7.889339,
            z_score: -0.369697,
            polarity: Polarity::LowerIsBetter,
            min: 0.0,
            max: 20.0,
        },
    ]
}

fn pca_model() -> PcaModel {
    PcaModel {
        // Explained variance of the 3 retained components, percent.
        variance: [56.34, 16.15, 16.09],
        // Varimax-rotated, polarity-corrected loadings; row i belongs to
        // indicator id i + 1.
        loadings: vec![
            [0.381003, 0.89459, -0.213684],
            [0.751384, 0.00685, -0.752621],
            [0.337724, -0.149784, -0.599481],
            [0.949673, 0.144157, -0.215842],
            [0.949382, 0.081859, -0.167123],
            [0.755817, 0.44174, -0.431606],
            [0.911477, 0.173475, -0.277172],
            [0.732725, -0.524156, -0.034115],
            [0.94613, 0.089762, -0.262476],
            [0.776967, 0.420059, -0.284928],
            [-0.003182, 0.910167, -0.068535],
            [0.955296, 0.09236, -0.255403],
            [0.969793, 0.154722, -0.193228],
            [0.784335, 0.681912, 0.335528],
            [0.932145, 0.255729, -0.27122],
            [0.955551, 0.15061, -0.029688],
            [-0.115961, -0.110706, 1.093224],
        ],
    }
}

fn benchmarks() -> Benchmarks {
    let mut domains = HashMap::new();
    domains.insert(DomainCode::Ge, symmetric(73.699993));
    domains.insert(DomainCode::Sm, symmetric(73.699993));
    domains.insert(DomainCode::Brs, symmetric(73.699993));
    domains.insert(DomainCode::Wm, symmetric(127.652132));
    domains.insert(DomainCode::Cw, symmetric(194.991853));
    domains.insert(DomainCode::Deci, symmetric(147.399986));

    Benchmarks {
        mcei: symmetric(303.872855),
        domains,
    }
}

fn symmetric(bound: f64) -> Benchmark {
    Benchmark {
        lower: -bound,
        upper: bound,
    }
}

fn interventions() -> Vec<Intervention> {
    vec![
        Intervention {
            id: 1,
            name: "Community Composting",
            short_name: "P1",
            description: "Community composting scheme for the organic fraction of municipal waste",
            main_impact: "-0.13 kg/inhabitant MSW",
            public_share_pct: 50.0,
            // Coefficients per tonne of organic fraction.
            coefficients: UnitCoefficients {
                cost: 1136.0,
                revenue: 298.0,
                env_benefit: 124.0,
                soc_benefit: 79.6,
                npv: 1123.0,
            },
            driver: Driver::Organic,
            impacts: vec![ImpactRule {
                indicator: 7,
                op: ImpactOp::Subtract,
                magnitude: 0.13,
            }],
        },
        Intervention {
            id: 2,
            name: "Rainwater Harvesting",
            short_name: "P2",
            description: "Collection and reuse system for rainwater",
            main_impact: "-60% water indicators",
            public_share_pct: 80.0,
            // Coefficients per inhabitant.
            coefficients: UnitCoefficients {
                cost: 643.0,
                revenue: 52.0,
                env_benefit: 0.064,
                soc_benefit: 36.73,
                npv: 385.6,
            },
            driver: Driver::Population,
            impacts: vec![
                ImpactRule {
                    indicator: 4,
                    op: ImpactOp::Multiply,
                    magnitude: 0.4,
                },
                ImpactRule {
                    indicator: 5,
                    op: ImpactOp::Multiply,
                    magnitude: 0.4,
                },
                ImpactRule {
                    indicator: 6,
                    op: ImpactOp::Multiply,
                    magnitude: 0.4,
                },
            ],
        },
        Intervention {
            id: 3,
            name: "Bike Paths",
            short_name: "P3",
            description: "Cycle path construction for sustainable mobility",
            main_impact: "-7.79 pp emissions",
            public_share_pct: 80.0,
            coefficients: UnitCoefficients {
                cost: 97.0,
                revenue: 25.45,
                env_benefit: 12.78,
                soc_benefit: 11.42,
                npv: 125.6,
            },
            driver: Driver::Population,
            impacts: vec![ImpactRule {
                indicator: 2,
                op: ImpactOp::Subtract,
                magnitude: 7.79,
            }],
        },
        Intervention {
            id: 4,
            name: "Packaging Hub",
            short_name: "P4",
            description: "Packaging recycling hub",
            main_impact: "+1 firm, -0.05 kg/inhabitant MSW",
            public_share_pct: 65.0,
            // Coefficients per tonne of MSW.
            coefficients: UnitCoefficients {
                cost: 333.0,
                revenue: 112.0,
                env_benefit: 22.77,
                soc_benefit: 17.84,
                npv: 68.95,
            },
            driver: Driver::Msw,
            impacts: vec![
                ImpactRule {
                    indicator: 1,
                    op: ImpactOp::NewFirm,
                    magnitude: 1.0,
                },
                ImpactRule {
                    indicator: 7,
                    op: ImpactOp::Subtract,
                    magnitude: 0.05,
                },
            ],
        },
        Intervention {
            id: 5,
            name: "E-waste Hub",
            short_name: "P5",
            description: "Collection and recycling hub for WEEE",
            main_impact: "+1 firm, -0.003 kg/inhabitant MSW, +11.83 EUR/inhabitant hist. exp.",
            public_share_pct: 60.0,
            coefficients: UnitCoefficients {
                cost: 160.0,
                revenue: 143.0,
                env_benefit: 19.38,
                soc_benefit: 14.1,
                npv: 114.4,
            },
            driver: Driver::Population,
            impacts: vec![
                ImpactRule {
                    indicator: 1,
                    op: ImpactOp::NewFirm,
                    magnitude: 1.0,
                },
                ImpactRule {
                    indicator: 7,
                    op: ImpactOp::Subtract,
                    magnitude: 0.003,
                },
                ImpactRule {
                    indicator: 12,
                    op: ImpactOp::Add,
                    magnitude: 11.83,
                },
            ],
        },
        Intervention {
            id: 6,
            name: "Sustainable Wineries",
            short_name: "P6",
            description: "Conversion of wine estates to sustainable practice",
            main_impact: "-3.9 pp emissions, -0.39 kg/inhabitant MSW",
            public_share_pct: 50.0,
            // Coefficients per agricultural firm; inert when the
            // municipality has no such firms.
            coefficients: UnitCoefficients {
                cost: 342_849.0,
                revenue: 242_899.0,
                env_benefit: 27_525.0,
                soc_benefit: 61_000.0,
                npv: 428_840.0,
            },
            driver: Driver::AgriFirms,
            impacts: vec![
                ImpactRule {
                    indicator: 2,
                    op: ImpactOp::Subtract,
                    magnitude: 3.9,
                },
                ImpactRule {
                    indicator: 7,
                    op: ImpactOp::Subtract,
                    magnitude: 0.39,
                },
            ],
        },
    ]
}
