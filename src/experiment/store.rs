use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use crate::core::errors::StoreError;

pub type ExperimentId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentStatus {
    Running,
    Completed,
    Failed,
}

/// One persisted experiment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExperimentRecord {
    pub id: ExperimentId,
    pub name: String,
    pub description: String,
    pub parameters: Value,
    pub status: ExperimentStatus,
    pub created_at: String,
    pub results: Value,
}

impl ExperimentRecord {
    fn new(id: ExperimentId, name: &str, description: &str, parameters: &Value) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            parameters: parameters.clone(),
            status: ExperimentStatus::Running,
            created_at: Utc::now().to_rfc3339(),
            results: Value::Object(Default::default()),
        }
    }

    fn apply_status(&mut self, status: ExperimentStatus, results: Option<&Value>) {
        self.status = status;
        if let Some(results) = results {
            self.results = results.clone();
        }
    }
}

/// Durable record of experiment runs.
pub trait ExperimentStore {
    /// Records a new run in the `running` state and returns its id.
    fn save_experiment(
        &mut self,
        name: &str,
        description: &str,
        parameters: &Value,
    ) -> Result<ExperimentId, StoreError>;

    /// Moves a run to `status`, replacing its results when given.
    fn update_status(
        &mut self,
        id: ExperimentId,
        status: ExperimentStatus,
        results: Option<&Value>,
    ) -> Result<(), StoreError>;
}

/// Keeps records in memory for the lifetime of the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Vec<ExperimentRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ExperimentId) -> Option<&ExperimentRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

impl ExperimentStore for MemoryStore {
    fn save_experiment(
        &mut self,
        name: &str,
        description: &str,
        parameters: &Value,
    ) -> Result<ExperimentId, StoreError> {
        let id = self.records.len() as ExperimentId + 1;
        self.records
            .push(ExperimentRecord::new(id, name, description, parameters));
        Ok(id)
    }

    fn update_status(
        &mut self,
        id: ExperimentId,
        status: ExperimentStatus,
        results: Option<&Value>,
    ) -> Result<(), StoreError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::UnknownExperiment(id))?;
        record.apply_status(status, results);
        Ok(())
    }
}

/// One pretty-printed JSON file per experiment, `<dir>/<id>.json`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens (creating if needed) the record directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn record_path(&self, id: ExperimentId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Largest id present in the directory, 0 when empty.
    fn last_id(&self) -> Result<ExperimentId, StoreError> {
        let mut last = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<ExperimentId>().ok())
            {
                last = last.max(id);
            }
        }
        Ok(last)
    }

    fn read(&self, id: ExperimentId) -> Result<Value, StoreError> {
        let path = self.record_path(id);
        if !path.is_file() {
            return Err(StoreError::UnknownExperiment(id));
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    fn write<T: Serialize>(&self, id: ExperimentId, record: &T) -> Result<(), StoreError> {
        fs::write(self.record_path(id), serde_json::to_string_pretty(record)?)?;
        Ok(())
    }
}

impl ExperimentStore for JsonFileStore {
    fn save_experiment(
        &mut self,
        name: &str,
        description: &str,
        parameters: &Value,
    ) -> Result<ExperimentId, StoreError> {
        let id = self.last_id()? + 1;
        self.write(id, &ExperimentRecord::new(id, name, description, parameters))?;
        Ok(id)
    }

    fn update_status(
        &mut self,
        id: ExperimentId,
        status: ExperimentStatus,
        results: Option<&Value>,
    ) -> Result<(), StoreError> {
        let mut record = self.read(id)?;
        record["status"] = serde_json::to_value(status)?;
        if let Some(results) = results {
            record["results"] = results.clone();
        }
        self.write(id, &record)
    }
}
