use serde::Serialize;

use crate::domain::scenario::PropertyScenario;

pub const PROJECTION_YEARS: [u32; 6] = [0, 1, 2, 3, 4, 5];

/// Series colors, picked by position modulo the palette size.
pub const SERIES_PALETTE: [SeriesColor; 6] = [
    SeriesColor(255, 99, 132),
    SeriesColor(54, 162, 235),
    SeriesColor(255, 206, 86),
    SeriesColor(75, 192, 192),
    SeriesColor(153, 102, 255),
    SeriesColor(255, 159, 64),
];

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesColor(pub u8, pub u8, pub u8);

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ProjectionPoint {
    pub year: u32,
    pub value: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProjectionSeries {
    pub label: String,
    pub color: SeriesColor,
    pub points: Vec<ProjectionPoint>,
}

/// `purchase_price * (1 + appreciation_rate)^year`
pub fn projected_value(scenario: &PropertyScenario, year: u32) -> f64 {
    let growth = 1.0 + scenario.appreciation_rate;
    scenario.purchase_price * growth.powi(year as i32)
}

pub fn project_scenario(scenario: &PropertyScenario) -> Vec<ProjectionPoint> {
    PROJECTION_YEARS
        .iter()
        .map(|&year| ProjectionPoint {
            year,
            value: projected_value(scenario, year),
        })
        .collect()
}

/// One series per scenario, labeled and colored by position. Removing a
/// scenario shifts the colors of the ones after it.
pub fn project_portfolio(scenarios: &[PropertyScenario]) -> Vec<ProjectionSeries> {
    scenarios
        .iter()
        .enumerate()
        .map(|(position, scenario)| ProjectionSeries {
            label: property_label(position),
            color: series_color(position),
            points: project_scenario(scenario),
        })
        .collect()
}

/// 1-based label for the scenario at `position`.
pub fn property_label(position: usize) -> String {
    format!("Property {}", position + 1)
}

pub fn series_color(position: usize) -> SeriesColor {
    SERIES_PALETTE[position % SERIES_PALETTE.len()]
}
