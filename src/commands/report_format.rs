use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::scenario::{PropertyScenario, ScenarioField};
use crate::domain::simulation_result::SimulationResult;
use crate::services::aggregation::PortfolioSummary;
use crate::services::portfolio::Portfolio;
use crate::services::projection::{PROJECTION_YEARS, ProjectionSeries, property_label};

/// What `simulate -o` writes.
#[derive(Serialize, Debug, Clone)]
pub struct PortfolioReport {
    pub generated_at: DateTime<Local>,
    pub properties: Vec<PropertyReport>,
    pub summary: Option<PortfolioSummary>,
    pub projections: Vec<ProjectionSeries>,
}

#[derive(Serialize, Debug, Clone)]
pub struct PropertyReport {
    pub label: String,
    pub scenario: PropertyScenario,
    pub result: Option<SimulationResult>,
    pub capital_gain: Option<f64>,
}

impl PortfolioReport {
    pub fn from_portfolio(portfolio: &Portfolio) -> Self {
        let properties = portfolio
            .scenarios()
            .entries()
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                let result = portfolio.results().get(entry.id).cloned();
                PropertyReport {
                    label: property_label(position),
                    scenario: entry.scenario.clone(),
                    capital_gain: result
                        .as_ref()
                        .map(|r| r.capital_gain(entry.scenario.purchase_price)),
                    result,
                }
            })
            .collect();

        Self {
            generated_at: Local::now(),
            properties,
            summary: portfolio.summary(),
            projections: portfolio.projections(),
        }
    }
}

pub fn format_portfolio_report(report: &PortfolioReport) -> String {
    let mut lines = Vec::new();
    lines.push("Portfolio Report".to_string());

    for property in &report.properties {
        lines.push(String::new());
        lines.extend(format_property(property));
    }

    if let Some(summary) = &report.summary {
        lines.push(String::new());
        lines.extend(format_summary(summary));
    }

    if !report.projections.is_empty() {
        lines.push(String::new());
        lines.extend(format_projection_table(&report.projections));
    }

    lines.join("\n")
}

fn format_property(property: &PropertyReport) -> Vec<String> {
    let mut lines = vec![property.label.clone()];
    for field in ScenarioField::ALL {
        let value = property.scenario.display_value(field);
        let rendered = if field.is_percentage_displayed() {
            format!("{value:.2}%")
        } else if field == ScenarioField::TermYears {
            format!("{value:.0}")
        } else if field == ScenarioField::AnnualRate {
            format!("{}%", format_number(value))
        } else {
            format_currency(value)
        };
        lines.push(format!("  {}: {}", field.label(), rendered));
    }

    match (&property.result, property.capital_gain) {
        (Some(result), Some(gain)) => {
            lines.push(format!("  Cap rate: {}%", format_number(result.cap_rate)));
            lines.push(format!("  Cash on cash: {}%", format_number(result.cash_on_cash)));
            lines.push(format!("  Monthly payment: {}", format_currency(result.monthly_payment)));
            lines.push(format!("  Future value: {}", format_currency(result.future_value)));
            lines.push(format!("  Capital gain: {}", format_currency(gain)));
        }
        _ => lines.push("  Results not available".to_string()),
    }
    lines
}

fn format_summary(summary: &PortfolioSummary) -> Vec<String> {
    vec![
        "Portfolio Summary".to_string(),
        format!("  Total purchase price: {}", format_currency(summary.total_purchase_price)),
        format!("  Total down payment: {}", format_currency(summary.total_down_payment)),
        format!("  Total capital gain: {}", format_currency(summary.total_capital_gain)),
        format!("  Average cap rate: {}%", format_number(summary.avg_cap_rate)),
        format!("  Average cash on cash: {}%", format_number(summary.avg_cash_on_cash)),
        format!("  Total monthly payment: {}", format_currency(summary.total_monthly_payment)),
        format!("  Total future value: {}", format_currency(summary.total_future_value)),
    ]
}

fn format_projection_table(series: &[ProjectionSeries]) -> Vec<String> {
    let header: Vec<String> = PROJECTION_YEARS
        .iter()
        .map(|year| format!("Year {year}"))
        .collect();
    let mut lines = vec![
        "Value Projection".to_string(),
        format!("Property | {}", header.join(" | ")),
        format!("---------|{}", vec!["------"; header.len()].join("|")),
    ];
    for s in series {
        let values: Vec<String> = s.points.iter().map(|p| format_currency(p.value)).collect();
        lines.push(format!("{} | {}", s.label, values.join(" | ")));
    }
    lines
}

/// Groups the integer part in thousands and keeps up to two decimals.
pub fn format_number(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (integer, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::new();
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let fraction = fraction.trim_end_matches('0');
    let sign = if value < 0.0 && rounded.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

pub fn format_currency(value: f64) -> String {
    let number = format_number(value);
    match number.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${number}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dispatcher::SimulationDispatcher;
    use crate::test_support::ScriptedService;

    #[test]
    fn format_number_groups_thousands_and_trims_decimals() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.5), "999.5");
        assert_eq!(format_number(1_000.0), "1,000");
        assert_eq!(format_number(127_628.15625), "127,628.16");
        assert_eq!(format_number(1_234_567.891), "1,234,567.89");
        assert_eq!(format_number(-2_500.25), "-2,500.25");
        assert_eq!(format_number(-0.001), "0");
    }

    #[test]
    fn format_currency_places_sign_before_symbol() {
        assert_eq!(format_currency(20_000.0), "$20,000");
        assert_eq!(format_currency(-1_500.0), "-$1,500");
    }

    #[test]
    fn report_without_results_has_placeholders_and_no_summary() {
        let portfolio = Portfolio::new();
        let report = PortfolioReport::from_portfolio(&portfolio);

        let output = format_portfolio_report(&report);

        assert!(report.summary.is_none());
        assert!(output.contains("Property 1"));
        assert!(output.contains("  Purchase price: $100,000"));
        assert!(output.contains("  Vacancy rate (%): 2.00%"));
        assert!(output.contains("  Annual rate (%): 5%"));
        assert!(output.contains("  Term (years): 25"));
        assert!(output.contains("Results not available"));
        assert!(!output.contains("Portfolio Summary"));
        assert!(output.contains("Property 1 | $100,000 | $105,000 | $110,250"));
    }

    #[tokio::test]
    async fn report_with_results_shows_indicators_and_summary() {
        let mut portfolio = Portfolio::new();
        portfolio
            .simulate(&SimulationDispatcher::new(ScriptedService::new()))
            .await
            .unwrap();

        let report = PortfolioReport::from_portfolio(&portfolio);
        let output = format_portfolio_report(&report);

        assert_eq!(report.properties[0].capital_gain, Some(50_000.0));
        assert!(output.contains("  Cap rate: 5%"));
        assert!(output.contains("  Monthly payment: $100"));
        assert!(output.contains("  Capital gain: $50,000"));
        assert!(output.contains("Portfolio Summary"));
        assert!(output.contains("  Total future value: $150,000"));
        assert!(output.contains("  Average cash on cash: 5%"));
    }

    #[test]
    fn report_serializes_to_yaml() {
        let portfolio = Portfolio::new();
        let report = PortfolioReport::from_portfolio(&portfolio);

        let yaml = serde_yaml::to_string(&report).unwrap();

        assert!(yaml.contains("generated_at:"));
        assert!(yaml.contains("properties:"));
        assert!(yaml.contains("label: Property 1"));
        assert!(yaml.contains("summary: null"));
        assert!(yaml.contains("projections:"));
    }
}
