use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::scenario::{FieldEdit, PropertyScenario, ScenarioField, ScenarioId};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("no scenario at position {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("scenario id {0} appears more than once")]
    DuplicateId(ScenarioId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEntry {
    pub id: ScenarioId,
    #[serde(flatten)]
    pub scenario: PropertyScenario,
}

/// Ordered collection of scenarios. Insertion order is significant: it drives
/// labels, chart colors and report order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredScenarios")]
pub struct ScenarioStore {
    next_id: u64,
    entries: Vec<ScenarioEntry>,
}

/// On-disk shape of a [`ScenarioStore`], validated before use.
#[derive(Deserialize)]
struct StoredScenarios {
    #[serde(default)]
    next_id: u64,
    entries: Vec<ScenarioEntry>,
}

impl TryFrom<StoredScenarios> for ScenarioStore {
    type Error = StoreError;

    /// Rejects duplicate ids and moves `next_id` past every stored id, so a
    /// stale or hand-edited counter cannot hand out an id already in use.
    fn try_from(stored: StoredScenarios) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        for entry in &stored.entries {
            if !seen.insert(entry.id) {
                return Err(StoreError::DuplicateId(entry.id));
            }
        }
        let highest = stored.entries.iter().map(|entry| entry.id.0).max().unwrap_or(0);
        Ok(Self {
            next_id: stored.next_id.max(highest),
            entries: stored.entries,
        })
    }
}

impl ScenarioStore {
    /// Appends a scenario with default values and returns its id.
    pub fn add(&mut self) -> ScenarioId {
        self.push(PropertyScenario::default())
    }

    pub fn push(&mut self, scenario: PropertyScenario) -> ScenarioId {
        self.next_id += 1;
        let id = ScenarioId(self.next_id);
        self.entries.push(ScenarioEntry { id, scenario });
        id
    }

    /// Parses `raw` for `field` and applies it to the scenario at `index`.
    ///
    /// Returns `Ok(false)` when `raw` does not parse; the scenario is left
    /// as it was.
    pub fn update(
        &mut self,
        index: usize,
        field: ScenarioField,
        raw: &str,
    ) -> Result<bool, StoreError> {
        let entry = self.entry_mut(index)?;
        match FieldEdit::parse(field, raw) {
            Ok(edit) => {
                entry.scenario.apply(edit);
                Ok(true)
            }
            Err(err) => {
                debug!(scenario = %entry.id, ?field, %err, "discarding unparsable edit");
                Ok(false)
            }
        }
    }

    /// Removes the scenario at `index`. No lower bound is enforced; removing
    /// the last scenario leaves the store empty.
    pub fn remove(&mut self, index: usize) -> Result<ScenarioEntry, StoreError> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    pub fn entries(&self) -> &[ScenarioEntry] {
        &self.entries
    }

    pub fn scenarios(&self) -> Vec<PropertyScenario> {
        self.entries.iter().map(|entry| entry.scenario.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut ScenarioEntry, StoreError> {
        self.check_index(index)?;
        Ok(&mut self.entries[index])
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index >= self.entries.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}
