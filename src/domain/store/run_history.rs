use std::sync::{Arc, RwLock};

use crate::domain::simulation::run::SimulationRun;
use crate::domain::utils::id::{OperatorId, SimulationRunId};
use crate::error::{Error, Result};

/// Append-only log of completed runs. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RunHistory {
    runs: Arc<RwLock<Vec<SimulationRun>>>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, run: SimulationRun) -> Result<()> {
        let mut guard = self.runs.write().map_err(|_| Error::StorePoisoned)?;
        guard.push(run);
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.runs.read().map_err(|_| Error::StorePoisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Every run, newest first. Runs sharing a timestamp keep reverse append order.
    pub fn all(&self) -> Result<Vec<SimulationRun>> {
        self.newest_first(|_| true)
    }

    pub fn by_operator(&self, operator: &OperatorId) -> Result<Vec<SimulationRun>> {
        self.newest_first(|run| &run.simulated_by == operator)
    }

    pub fn latest(&self) -> Result<Option<SimulationRun>> {
        Ok(self.all()?.into_iter().next())
    }

    pub fn get(&self, id: &SimulationRunId) -> Result<Option<SimulationRun>> {
        let guard = self.runs.read().map_err(|_| Error::StorePoisoned)?;
        Ok(guard.iter().find(|run| &run.id == id).cloned())
    }

    fn newest_first(&self, keep: impl Fn(&SimulationRun) -> bool) -> Result<Vec<SimulationRun>> {
        let guard = self.runs.read().map_err(|_| Error::StorePoisoned)?;
        let mut runs: Vec<SimulationRun> = guard.iter().rev().filter(|&run| keep(run)).cloned().collect();
        runs.sort_by(|a, b| b.simulation_timestamp.cmp(&a.simulation_timestamp));
        Ok(runs)
    }
}

#[cfg(test)]
impl RunHistory {
    /// Leaves the log poisoned, as a writer panicking mid-append would.
    pub(crate) fn poison(&self) {
        let runs = Arc::clone(&self.runs);
        let _ = std::thread::spawn(move || {
            let _guard = runs.write();
            panic!("writer died holding the run log");
        })
        .join();
    }
}
