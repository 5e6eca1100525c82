// MIT License - Copyright (c) 2026 Peter Wright

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::devices::sensor::Sensor;
use crate::error::{Result, SecurityError};
use crate::status::{AlarmStatus, ArmingStatus};
use crate::store::SensorStore;

/// In-memory store. Starts disarmed, with no alarm and no sensors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    arming_status: ArmingStatus,
    #[serde(default)]
    alarm_status: AlarmStatus,
    #[serde(default)]
    sensors: BTreeSet<Sensor>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with sensors and statuses, bypassing the duplicate check.
    pub fn with_state(
        sensors: impl IntoIterator<Item = Sensor>,
        arming_status: ArmingStatus,
        alarm_status: AlarmStatus,
    ) -> Self {
        Self {
            arming_status,
            alarm_status,
            sensors: sensors.into_iter().collect(),
        }
    }
}

impl SensorStore for MemoryStore {
    fn sensors(&self) -> Result<Vec<Sensor>> {
        Ok(self.sensors.iter().cloned().collect())
    }

    fn sensor(&self, probe: &Sensor) -> Result<Option<Sensor>> {
        Ok(self.sensors.get(probe).cloned())
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        if self.sensors.contains(&sensor) {
            return Err(SecurityError::DuplicateSensor {
                name: sensor.name,
                sensor_type: sensor.sensor_type,
            });
        }
        self.sensors.insert(sensor);
        Ok(())
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<bool> {
        Ok(self.sensors.remove(sensor))
    }

    fn update_sensor(&mut self, sensor: Sensor) -> Result<()> {
        if !self.sensors.contains(&sensor) {
            return Err(SecurityError::UnknownSensor {
                name: sensor.name,
                sensor_type: sensor.sensor_type,
            });
        }
        // Equal by identity, so replace swaps in the new active flag
        self.sensors.replace(sensor);
        Ok(())
    }

    fn arming_status(&self) -> Result<ArmingStatus> {
        Ok(self.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<()> {
        self.arming_status = status;
        Ok(())
    }

    fn alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        self.alarm_status = status;
        Ok(())
    }
}
