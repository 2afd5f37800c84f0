use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::scenario::PropertyScenario;
use crate::domain::simulation_result::SimulationResult;
use crate::services::service_config::ServiceConfig;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("calculation service answered with status {0}")]
    Status(u16),
    #[error("calculation service unreachable: {0}")]
    Transport(String),
    #[error("unexpected calculation service response: {0}")]
    Decode(String),
}

/// Computes the indicators of one scenario.
pub trait CalculationService {
    async fn calculate(
        &self,
        scenario: &PropertyScenario,
    ) -> Result<SimulationResult, SimulationError>;
}

/// Request body understood by the calculation service. `tasa_anual` is a
/// plain percentage while `vacancia` and `tasa_plusvalia` are fractions.
#[derive(Serialize, Debug)]
struct ScenarioPayload {
    precio_propiedad: f64,
    pie: f64,
    tasa_anual: f64,
    plazo_anos: u32,
    arriendo_mensual: f64,
    gastos_admin: f64,
    vacancia: f64,
    tasa_plusvalia: f64,
}

impl From<&PropertyScenario> for ScenarioPayload {
    fn from(scenario: &PropertyScenario) -> Self {
        Self {
            precio_propiedad: scenario.purchase_price,
            pie: scenario.down_payment,
            tasa_anual: scenario.annual_rate,
            plazo_anos: scenario.term_years,
            arriendo_mensual: scenario.monthly_rent,
            gastos_admin: scenario.monthly_admin_cost,
            vacancia: scenario.vacancy_rate,
            tasa_plusvalia: scenario.appreciation_rate,
        }
    }
}

#[derive(Deserialize, Debug)]
struct ResultPayload {
    #[serde(alias = "capRate")]
    cap_rate: f64,
    #[serde(alias = "cashOnCash")]
    cash_on_cash: f64,
    #[serde(alias = "monthlyPayment")]
    cuota_mensual: f64,
    #[serde(alias = "futureValue")]
    valor_futuro: f64,
}

impl From<ResultPayload> for SimulationResult {
    fn from(payload: ResultPayload) -> Self {
        Self {
            cap_rate: payload.cap_rate,
            cash_on_cash: payload.cash_on_cash,
            monthly_payment: payload.cuota_mensual,
            future_value: payload.valor_futuro,
        }
    }
}

pub struct HttpCalculationService {
    url: String,
    client: Client,
}

impl HttpCalculationService {
    pub fn new(config: &ServiceConfig) -> Result<Self, SimulationError> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|err| SimulationError::Transport(err.to_string()))?;

        Ok(Self {
            url: config.simulation_url(),
            client,
        })
    }
}

impl CalculationService for HttpCalculationService {
    async fn calculate(
        &self,
        scenario: &PropertyScenario,
    ) -> Result<SimulationResult, SimulationError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ScenarioPayload::from(scenario))
            .send()
            .await
            .map_err(|err| SimulationError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SimulationError::Status(status.as_u16()));
        }

        response
            .json::<ResultPayload>()
            .await
            .map(SimulationResult::from)
            .map_err(|err| SimulationError::Decode(err.to_string()))
    }
}
