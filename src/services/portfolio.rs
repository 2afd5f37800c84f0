use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::result_store::{ResultEntry, ResultStore};
use crate::domain::scenario::{ScenarioField, ScenarioId};
use crate::domain::scenario_store::{ScenarioEntry, ScenarioStore, StoreError};
use crate::domain::simulation_result::SimulationResult;
use crate::services::aggregation::{PortfolioSummary, summarize};
use crate::services::calculation_service::{CalculationService, SimulationError};
use crate::services::dispatcher::SimulationDispatcher;
use crate::services::projection::{ProjectionSeries, project_portfolio};

/// A scenario together with its latest result, in display order.
pub struct SimulatedProperty<'a> {
    pub position: usize,
    pub entry: &'a ScenarioEntry,
    pub result: &'a SimulationResult,
}

/// Session state: the scenarios, the results of the last successful run
/// and whether a run is in flight.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Portfolio {
    scenarios: ScenarioStore,
    #[serde(default)]
    results: ResultStore,
    #[serde(skip)]
    busy: Arc<AtomicBool>,
}

impl Portfolio {
    /// A session holding one default scenario.
    pub fn new() -> Self {
        let mut portfolio = Self::default();
        portfolio.scenarios.add();
        portfolio
    }

    pub fn scenarios(&self) -> &ScenarioStore {
        &self.scenarios
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn add_scenario(&mut self) -> ScenarioId {
        self.scenarios.add()
    }

    pub fn update_scenario(
        &mut self,
        index: usize,
        field: ScenarioField,
        raw: &str,
    ) -> Result<bool, StoreError> {
        self.scenarios.update(index, field, raw)
    }

    /// Removes the scenario at `index` along with its result.
    pub fn remove_scenario(&mut self, index: usize) -> Result<ScenarioEntry, StoreError> {
        let removed = self.scenarios.remove(index)?;
        self.results.remove(removed.id);
        Ok(removed)
    }

    /// Shared view of the busy flag. Advisory only: nothing stops a second
    /// run while one is in flight.
    pub fn busy_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.busy)
    }

    /// Simulates every scenario and replaces the result set on success.
    /// On failure the previous results stay untouched.
    pub async fn simulate<S: CalculationService>(
        &mut self,
        dispatcher: &SimulationDispatcher<S>,
    ) -> Result<(), SimulationError> {
        let _busy = BusyGuard::raise(Arc::clone(&self.busy));

        let ids: Vec<ScenarioId> = self.scenarios.entries().iter().map(|entry| entry.id).collect();
        let scenarios = self.scenarios.scenarios();
        match dispatcher.run(&scenarios).await {
            Ok(results) => {
                let entries = ids
                    .into_iter()
                    .zip(results)
                    .map(|(scenario_id, result)| ResultEntry {
                        scenario_id,
                        result,
                    })
                    .collect();
                self.results.replace_all(entries);
                Ok(())
            }
            Err(err) => {
                error!(%err, scenarios = scenarios.len(), "simulation batch failed");
                Err(err)
            }
        }
    }

    /// Scenarios that have a result, in scenario order.
    pub fn simulated(&self) -> Vec<SimulatedProperty<'_>> {
        self.scenarios
            .entries()
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                self.results.get(entry.id).map(|result| SimulatedProperty {
                    position,
                    entry,
                    result,
                })
            })
            .collect()
    }

    /// `None` while there are no results, so nothing is shown at all.
    pub fn summary(&self) -> Option<PortfolioSummary> {
        if self.results.is_empty() {
            return None;
        }
        let simulated = self.simulated();
        Some(summarize(
            self.scenarios.entries().iter().map(|entry| &entry.scenario),
            simulated
                .iter()
                .map(|property| (&property.entry.scenario, property.result)),
        ))
    }

    pub fn projections(&self) -> Vec<ProjectionSeries> {
        project_portfolio(&self.scenarios.scenarios())
    }
}

struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn raise(flag: Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
