use serde::Serialize;

use crate::domain::scenario::PropertyScenario;
use crate::domain::simulation_result::SimulationResult;

/// Portfolio-wide figures derived from the scenarios and their results.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct PortfolioSummary {
    pub total_purchase_price: f64,
    pub total_down_payment: f64,
    pub total_capital_gain: f64,
    pub avg_cap_rate: f64,
    pub avg_cash_on_cash: f64,
    pub total_monthly_payment: f64,
    pub total_future_value: f64,
}

/// Aggregates a portfolio.
///
/// Price and down-payment totals cover every scenario. Everything else only
/// covers the `simulated` pairs; scenarios without a result are left out.
/// With no pairs the result-dependent figures are all zero.
pub fn summarize<'a, S, P>(scenarios: S, simulated: P) -> PortfolioSummary
where
    S: IntoIterator<Item = &'a PropertyScenario>,
    P: IntoIterator<Item = (&'a PropertyScenario, &'a SimulationResult)>,
{
    let mut summary = PortfolioSummary::default();
    for scenario in scenarios {
        summary.total_purchase_price += scenario.purchase_price;
        summary.total_down_payment += scenario.down_payment;
    }

    let mut cap_rate_sum = 0.0;
    let mut cash_on_cash_sum = 0.0;
    let mut count = 0usize;
    for (scenario, result) in simulated {
        summary.total_capital_gain += result.capital_gain(scenario.purchase_price);
        summary.total_monthly_payment += result.monthly_payment;
        summary.total_future_value += result.future_value;
        cap_rate_sum += result.cap_rate;
        cash_on_cash_sum += result.cash_on_cash;
        count += 1;
    }

    if count > 0 {
        summary.avg_cap_rate = cap_rate_sum / count as f64;
        summary.avg_cash_on_cash = cash_on_cash_sum / count as f64;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{result_with, scenario_with_price};

    #[test]
    fn totals_cover_all_scenarios_even_without_results() {
        let scenarios = vec![
            scenario_with_price(100_000.0, 25),
            scenario_with_price(200_000.0, 25),
        ];

        let summary = summarize(&scenarios, []);

        assert_eq!(summary.total_purchase_price, 300_000.0);
        assert_eq!(summary.total_down_payment, 40_000.0);
    }

    #[test]
    fn averages_are_zero_without_results() {
        let scenarios = vec![scenario_with_price(100_000.0, 25)];

        let summary = summarize(&scenarios, []);

        assert_eq!(summary.avg_cap_rate, 0.0);
        assert_eq!(summary.avg_cash_on_cash, 0.0);
        assert_eq!(summary.total_capital_gain, 0.0);
        assert_eq!(summary.total_monthly_payment, 0.0);
        assert_eq!(summary.total_future_value, 0.0);
    }

    #[test]
    fn result_figures_pair_results_with_their_scenarios() {
        let scenarios = vec![
            scenario_with_price(100_000.0, 25),
            scenario_with_price(200_000.0, 25),
        ];
        let mut first = result_with(4.0, 6.0, 130_000.0);
        first.monthly_payment = 450.0;
        let mut second = result_with(5.0, 8.0, 250_000.0);
        second.monthly_payment = 900.0;
        let results = vec![first, second];

        let summary = summarize(&scenarios, scenarios.iter().zip(results.iter()));

        assert_eq!(summary.total_capital_gain, 80_000.0);
        assert_eq!(summary.avg_cap_rate, 4.5);
        assert_eq!(summary.avg_cash_on_cash, 7.0);
        assert_eq!(summary.total_monthly_payment, 1_350.0);
        assert_eq!(summary.total_future_value, 380_000.0);
    }

    #[test]
    fn unsimulated_scenarios_are_excluded_from_result_figures() {
        let scenarios = vec![
            scenario_with_price(100_000.0, 25),
            scenario_with_price(200_000.0, 25),
        ];
        let results = vec![result_with(4.0, 6.0, 110_000.0)];

        let summary = summarize(&scenarios, scenarios.iter().zip(results.iter()));

        assert_eq!(summary.total_purchase_price, 300_000.0);
        assert_eq!(summary.total_capital_gain, 10_000.0);
        assert_eq!(summary.avg_cap_rate, 4.0);
        assert_eq!(summary.total_future_value, 110_000.0);
    }
}
