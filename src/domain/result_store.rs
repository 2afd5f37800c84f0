use serde::{Deserialize, Serialize};

use crate::domain::scenario::ScenarioId;
use crate::domain::simulation_result::SimulationResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub scenario_id: ScenarioId,
    #[serde(flatten)]
    pub result: SimulationResult,
}

/// Results of the last successful run, keyed by the scenario that produced
/// them and kept in dispatch order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultStore {
    entries: Vec<ResultEntry>,
}

impl ResultStore {
    /// Swaps in a complete result set. There is no partial merge.
    pub fn replace_all(&mut self, entries: Vec<ResultEntry>) {
        self.entries = entries;
    }

    pub fn remove(&mut self, scenario_id: ScenarioId) -> Option<ResultEntry> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.scenario_id == scenario_id)?;
        Some(self.entries.remove(position))
    }

    pub fn get(&self, scenario_id: ScenarioId) -> Option<&SimulationResult> {
        self.entries
            .iter()
            .find(|entry| entry.scenario_id == scenario_id)
            .map(|entry| &entry.result)
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
