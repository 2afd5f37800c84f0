use std::time::Instant;

use futures::future::try_join_all;
use tracing::info;

use crate::domain::scenario::PropertyScenario;
use crate::domain::simulation_result::SimulationResult;
use crate::services::calculation_service::{CalculationService, SimulationError};

/// Fans a batch of scenarios out to the calculation service.
pub struct SimulationDispatcher<S> {
    service: S,
}

impl<S: CalculationService> SimulationDispatcher<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    #[cfg(test)]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Issues one request per scenario, all at once, and waits for every one
    /// of them. The first failure fails the batch and no partial list is
    /// returned. On success `results[i]` belongs to `scenarios[i]`.
    pub async fn run(
        &self,
        scenarios: &[PropertyScenario],
    ) -> Result<Vec<SimulationResult>, SimulationError> {
        let started = Instant::now();
        info!(count = scenarios.len(), "dispatching simulation batch");

        let requests = scenarios
            .iter()
            .map(|scenario| self.service.calculate(scenario));
        let results = try_join_all(requests).await?;

        info!(
            count = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "simulation batch completed"
        );
        Ok(results)
    }
}
