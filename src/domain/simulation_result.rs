use serde::{Deserialize, Serialize};

/// Financial indicators computed by the calculation service for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Percentage, e.g. `4.8` for 4.8%.
    pub cap_rate: f64,
    /// Percentage.
    pub cash_on_cash: f64,
    pub monthly_payment: f64,
    /// Property value at the service's horizon.
    pub future_value: f64,
}

impl SimulationResult {
    pub fn capital_gain(&self, purchase_price: f64) -> f64 {
        self.future_value - purchase_price
    }
}
