//! Experiment runs: analysis plus status bookkeeping in an [`ExperimentStore`].
//!
//! The store is a side channel. A store failure is logged and the run goes on;
//! only a failed analysis turns into an error for the caller.

mod store;

pub use store::{
    ExperimentId, ExperimentRecord, ExperimentStatus, ExperimentStore, JsonFileStore, MemoryStore,
};

use tracing::{info, warn};

use crate::analysis::{AnalysisReport, analyze_family};
use crate::config::AnalysisConfig;
use crate::core::errors::AnalysisError;
use crate::families::StateFamily;

/// A finished run. `id` is `None` when the store could not record the start.
#[derive(Clone, Debug)]
pub struct ExperimentRun {
    pub id: Option<ExperimentId>,
    pub report: AnalysisReport,
}

fn record_start(store: &mut dyn ExperimentStore, family: &StateFamily) -> Option<ExperimentId> {
    match store.save_experiment(
        &family.experiment_name(),
        family.experiment_description(),
        &family.parameters(),
    ) {
        Ok(id) => {
            info!(id, family = family.tag(), "experiment recorded");
            Some(id)
        }
        Err(err) => {
            warn!(%err, "could not record experiment, continuing without it");
            None
        }
    }
}

fn record_end(
    store: &mut dyn ExperimentStore,
    id: ExperimentId,
    status: ExperimentStatus,
    results: Option<&serde_json::Value>,
) {
    match store.update_status(id, status, results) {
        Ok(()) => info!(id, ?status, "experiment status updated"),
        Err(err) => warn!(id, %err, "could not update experiment status"),
    }
}

/// Analyzes `family` and records the run in `store` when one is given.
pub fn run_experiment(
    family: &StateFamily,
    config: &AnalysisConfig,
    mut store: Option<&mut dyn ExperimentStore>,
) -> Result<ExperimentRun, AnalysisError> {
    let id = store
        .as_deref_mut()
        .and_then(|store| record_start(store, family));

    let outcome = analyze_family(family, config);

    if let (Some(store), Some(id)) = (store.as_deref_mut(), id) {
        match &outcome {
            Ok(report) => match serde_json::to_value(report) {
                Ok(results) => record_end(store, id, ExperimentStatus::Completed, Some(&results)),
                Err(err) => {
                    warn!(id, %err, "could not serialize report");
                    record_end(store, id, ExperimentStatus::Completed, None);
                }
            },
            Err(_) => record_end(store, id, ExperimentStatus::Failed, None),
        }
    }

    let report = outcome?;
    Ok(ExperimentRun { id, report })
}
