use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::scenario::PropertyScenario;
use crate::domain::simulation_result::SimulationResult;
use crate::services::calculation_service::{CalculationService, SimulationError};

/// An in-process calculation service with deterministic answers.
///
/// Each request sleeps one millisecond per `term_years` of the scenario, so
/// tests can make requests finish in any order. The answer is derived from
/// the scenario: `cap_rate = annual_rate`, `cash_on_cash = monthly_rent / 100`,
/// `monthly_payment = purchase_price / 1000` and
/// `future_value = purchase_price * 1.5`.
#[derive(Default)]
pub struct ScriptedService {
    fail_on_price: Option<f64>,
    busy_flag: Option<Arc<AtomicBool>>,
    busy_seen: AtomicBool,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers with status 500 for scenarios priced at `price`.
    pub fn failing_on(price: f64) -> Self {
        Self {
            fail_on_price: Some(price),
            ..Self::default()
        }
    }

    /// Records whether `flag` was raised while a request was being served.
    pub fn observing(mut self, flag: Arc<AtomicBool>) -> Self {
        self.busy_flag = Some(flag);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn busy_seen(&self) -> bool {
        self.busy_seen.load(Ordering::SeqCst)
    }
}

impl CalculationService for ScriptedService {
    async fn calculate(
        &self,
        scenario: &PropertyScenario,
    ) -> Result<SimulationResult, SimulationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        if let Some(flag) = &self.busy_flag {
            if flag.load(Ordering::SeqCst) {
                self.busy_seen.store(true, Ordering::SeqCst);
            }
        }

        tokio::time::sleep(Duration::from_millis(u64::from(scenario.term_years))).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_on_price == Some(scenario.purchase_price) {
            return Err(SimulationError::Status(500));
        }
        Ok(SimulationResult {
            cap_rate: scenario.annual_rate,
            cash_on_cash: scenario.monthly_rent / 100.0,
            monthly_payment: scenario.purchase_price / 1000.0,
            future_value: scenario.purchase_price * 1.5,
        })
    }
}

pub fn scenario_with_price(purchase_price: f64, term_years: u32) -> PropertyScenario {
    PropertyScenario {
        purchase_price,
        term_years,
        ..PropertyScenario::default()
    }
}

pub fn result_with(cap_rate: f64, cash_on_cash: f64, future_value: f64) -> SimulationResult {
    SimulationResult {
        cap_rate,
        cash_on_cash,
        monthly_payment: 0.0,
        future_value,
    }
}
