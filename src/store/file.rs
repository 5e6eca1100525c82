// MIT License - Copyright (c) 2026 Peter Wright

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::devices::sensor::Sensor;
use crate::error::{Result, SecurityError};
use crate::status::{AlarmStatus, ArmingStatus};
use crate::store::{MemoryStore, SensorStore};

/// Store that keeps its state in a JSON document on disk.
///
/// The whole document is rewritten after every mutation. A mutation is
/// applied to a copy of the state first, written to a sibling `.tmp` file and
/// renamed over the document. Memory is only committed once the rename
/// succeeds, so a failed write leaves both sides at the last successful state.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            serde_json::from_str(&text)?
        } else {
            debug!("No store at {}, starting empty", path.display());
            MemoryStore::new()
        };
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the next document is staged in before the rename.
    fn staging_path(&self) -> Result<PathBuf> {
        let Some(name) = self.path.file_name() else {
            return Err(SecurityError::Store {
                reason: format!("store path {} has no file name", self.path.display()),
            });
        };
        let mut staged = name.to_os_string();
        staged.push(".tmp");
        Ok(self.path.with_file_name(staged))
    }

    fn mutate<T>(&mut self, f: impl FnOnce(&mut MemoryStore) -> Result<T>) -> Result<T> {
        let mut next = self.state.clone();
        let out = f(&mut next)?;
        let json = serde_json::to_string_pretty(&next)?;
        let staged = self.staging_path()?;
        if let Err(e) = std::fs::write(&staged, json) {
            // Best effort; the document itself is untouched
            let _ = std::fs::remove_file(&staged);
            return Err(e.into());
        }
        std::fs::rename(&staged, &self.path)?;
        self.state = next;
        Ok(out)
    }
}

impl SensorStore for JsonFileStore {
    fn sensors(&self) -> Result<Vec<Sensor>> {
        self.state.sensors()
    }

    fn sensor(&self, probe: &Sensor) -> Result<Option<Sensor>> {
        self.state.sensor(probe)
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        self.mutate(|s| s.add_sensor(sensor))
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<bool> {
        if self.state.sensor(sensor)?.is_none() {
            return Ok(false);
        }
        self.mutate(|s| s.remove_sensor(sensor))
    }

    fn update_sensor(&mut self, sensor: Sensor) -> Result<()> {
        self.mutate(|s| s.update_sensor(sensor))
    }

    fn arming_status(&self) -> Result<ArmingStatus> {
        self.state.arming_status()
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<()> {
        self.mutate(|s| s.set_arming_status(status))
    }

    fn alarm_status(&self) -> Result<AlarmStatus> {
        self.state.alarm_status()
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        self.mutate(|s| s.set_alarm_status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::sensor::SensorType;
    use crate::error::SecurityError;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("catpoint-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let path = temp_path();
        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.sensors().unwrap().is_empty());
        assert_eq!(store.arming_status().unwrap(), ArmingStatus::Disarmed);
        assert!(!path.exists());
    }

    #[test]
    fn test_state_survives_reopen() {
        let path = temp_path();
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.add_sensor(Sensor::new("Front", SensorType::Door)).unwrap();
            store
                .update_sensor(Sensor::new("Front", SensorType::Door).with_active(true))
                .unwrap();
            store.set_arming_status(ArmingStatus::ArmedAway).unwrap();
            store.set_alarm_status(AlarmStatus::PendingAlarm).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        let sensors = store.sensors().unwrap();
        assert_eq!(sensors.len(), 1);
        assert!(sensors[0].active);
        assert_eq!(store.arming_status().unwrap(), ArmingStatus::ArmedAway);
        assert_eq!(store.alarm_status().unwrap(), AlarmStatus::PendingAlarm);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_document_uses_wire_names() {
        let path = temp_path();
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set_arming_status(ArmingStatus::ArmedHome).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["arming_status"], "ARMED_HOME");
        assert_eq!(doc["alarm_status"], "NO_ALARM");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_rejected_mutation_is_not_persisted() {
        let path = temp_path();
        let mut store = JsonFileStore::open(&path).unwrap();
        store.add_sensor(Sensor::new("Front", SensorType::Door)).unwrap();

        let err = store.add_sensor(Sensor::new("Front", SensorType::Door)).unwrap_err();
        assert!(matches!(err, SecurityError::DuplicateSensor { .. }));

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.sensors().unwrap().len(), 1);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_failed_write_keeps_last_document() {
        let path = temp_path();
        let mut store = JsonFileStore::open(&path).unwrap();
        store.add_sensor(Sensor::new("Front", SensorType::Door)).unwrap();

        // A directory squatting on the staging file makes the next write fail
        let staged = store.staging_path().unwrap();
        std::fs::create_dir(&staged).unwrap();

        let err = store.add_sensor(Sensor::new("Back", SensorType::Door)).unwrap_err();
        assert!(matches!(err, SecurityError::Io(_)));
        assert!(err.is_retryable());
        assert_eq!(store.sensors().unwrap().len(), 1);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.sensors().unwrap(), vec![Sensor::new("Front", SensorType::Door)]);

        // Once the obstruction is gone, writes go through again
        std::fs::remove_dir(&staged).unwrap();
        store.add_sensor(Sensor::new("Back", SensorType::Door)).unwrap();
        assert!(!staged.exists());
        assert_eq!(JsonFileStore::open(&path).unwrap().sensors().unwrap().len(), 2);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_path_without_file_name_is_a_store_error() {
        let mut store = JsonFileStore {
            path: PathBuf::from("/"),
            state: MemoryStore::new(),
        };
        let err = store.set_arming_status(ArmingStatus::ArmedAway).unwrap_err();
        assert!(matches!(err, SecurityError::Store { .. }));
        assert!(!err.is_retryable());
        assert_eq!(store.arming_status().unwrap(), ArmingStatus::Disarmed);
    }

    #[test]
    fn test_remove_reports_whether_sensor_was_tracked() {
        let path = temp_path();
        let mut store = JsonFileStore::open(&path).unwrap();
        store.add_sensor(Sensor::new("Front", SensorType::Door)).unwrap();

        assert!(!store.remove_sensor(&Sensor::new("Ghost", SensorType::Door)).unwrap());
        assert!(store.remove_sensor(&Sensor::new("Front", SensorType::Door)).unwrap());
        assert!(JsonFileStore::open(&path).unwrap().sensors().unwrap().is_empty());
        assert_eq!(store.path(), path.as_path());

        std::fs::remove_file(&path).unwrap();
    }
}
