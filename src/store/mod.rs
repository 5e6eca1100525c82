// MIT License - Copyright (c) 2026 Peter Wright

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::devices::sensor::Sensor;
use crate::error::Result;
use crate::status::{AlarmStatus, ArmingStatus};

/// Storage for sensors and the two system statuses.
///
/// Implementations provide storage semantics only. Every business rule
/// lives in [`crate::SecurityService`], which is the sole caller.
pub trait SensorStore: Send {
    /// All tracked sensors, ordered by name then type.
    fn sensors(&self) -> Result<Vec<Sensor>>;

    /// The stored copy of the sensor with the same identity as `probe`.
    fn sensor(&self, probe: &Sensor) -> Result<Option<Sensor>> {
        Ok(self.sensors()?.into_iter().find(|s| s.same_identity(probe)))
    }

    /// Track a new sensor. Fails with `DuplicateSensor` if the identity is taken.
    fn add_sensor(&mut self, sensor: Sensor) -> Result<()>;

    /// Stop tracking a sensor. Returns false, changing nothing, for an
    /// unknown sensor.
    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<bool>;

    /// Overwrite the stored copy of a tracked sensor.
    fn update_sensor(&mut self, sensor: Sensor) -> Result<()>;

    fn arming_status(&self) -> Result<ArmingStatus>;

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<()>;

    fn alarm_status(&self) -> Result<AlarmStatus>;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()>;
}

impl<S: SensorStore + ?Sized> SensorStore for Box<S> {
    fn sensors(&self) -> Result<Vec<Sensor>> {
        (**self).sensors()
    }

    fn sensor(&self, probe: &Sensor) -> Result<Option<Sensor>> {
        (**self).sensor(probe)
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        (**self).add_sensor(sensor)
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<bool> {
        (**self).remove_sensor(sensor)
    }

    fn update_sensor(&mut self, sensor: Sensor) -> Result<()> {
        (**self).update_sensor(sensor)
    }

    fn arming_status(&self) -> Result<ArmingStatus> {
        (**self).arming_status()
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<()> {
        (**self).set_arming_status(status)
    }

    fn alarm_status(&self) -> Result<AlarmStatus> {
        (**self).alarm_status()
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        (**self).set_alarm_status(status)
    }
}
