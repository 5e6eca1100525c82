// MIT License - Copyright (c) 2026 Peter Wright

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::SecurityConfig;
use crate::devices::sensor::Sensor;
use crate::error::{Result, SecurityError};
use crate::listener::{ListenerSet, StatusListener};
use crate::status::{AlarmStatus, ArmingStatus};
use crate::store::SensorStore;
use crate::vision::VisionClassifier;

/// The alarm controller.
///
/// Owns no state of its own beyond the last camera frame and the listener
/// registry: sensors and both statuses live in the [`SensorStore`]. Every
/// method runs to completion synchronously, listener callbacks included.
/// Callers sharing a service between tasks wrap it in a single mutex.
///
/// Store and classifier failures are returned as-is; a failure aborts the
/// call, leaving the store as of its last successful write.
///
/// # Example
///
/// ```
/// use catpoint::{
///     AlarmStatus, ArmingStatus, MemoryStore, RandomClassifier, SecurityService, Sensor,
///     SensorType,
/// };
///
/// # fn main() -> catpoint::Result<()> {
/// let mut service = SecurityService::new(MemoryStore::new(), RandomClassifier);
/// let door = Sensor::new("Front Door", SensorType::Door);
/// service.add_sensor(door.clone())?;
///
/// service.set_arming_status(ArmingStatus::ArmedAway)?;
/// service.change_sensor_activation_status(&door, true)?;
/// assert_eq!(service.alarm_status()?, AlarmStatus::PendingAlarm);
///
/// service.set_arming_status(ArmingStatus::Disarmed)?;
/// assert_eq!(service.alarm_status()?, AlarmStatus::NoAlarm);
/// # Ok(())
/// # }
/// ```
pub struct SecurityService<S, V: VisionClassifier> {
    store: S,
    classifier: V,
    config: SecurityConfig,
    current_image: Option<V::Image>,
    listeners: ListenerSet,
}

impl<S: SensorStore, V: VisionClassifier> SecurityService<S, V> {
    pub fn new(store: S, classifier: V) -> Self {
        Self::with_config(store, classifier, SecurityConfig::default())
    }

    pub fn with_config(store: S, classifier: V, config: SecurityConfig) -> Self {
        Self {
            store,
            classifier,
            config,
            current_image: None,
            listeners: ListenerSet::new(),
        }
    }

    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Arming ---

    /// Set the arming mode.
    ///
    /// Disarming always clears the alarm. Arming (home or away) resets every
    /// sensor to inactive and raises the alarm if the last camera frame
    /// shows a cat.
    pub fn set_arming_status(&mut self, status: ArmingStatus) -> Result<()> {
        info!("Arming status -> {}", status);
        self.store.set_arming_status(status)?;

        if status.is_armed() {
            self.reset_sensors()?;
            if self.last_image_contains_cat()? {
                info!("Last camera frame shows a cat while arming");
                self.set_alarm_status(AlarmStatus::Alarm)?;
            }
        } else {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }

        self.listeners.arming_status(status);
        Ok(())
    }

    fn reset_sensors(&mut self) -> Result<()> {
        let mut reset = 0;
        for sensor in self.store.sensors()? {
            if sensor.active {
                self.store.update_sensor(sensor.with_active(false))?;
                reset += 1;
            }
        }
        if reset > 0 {
            debug!("Reset {} active sensor(s) on arming", reset);
            self.listeners.sensors_changed();
        }
        Ok(())
    }

    fn last_image_contains_cat(&self) -> Result<bool> {
        match &self.current_image {
            Some(image) => self
                .classifier
                .contains_cat(image, self.config.cat_confidence_threshold),
            None => Ok(false),
        }
    }

    // --- Camera ---

    /// Classify a camera frame and apply the cat-detection rule.
    ///
    /// The frame is remembered for a later [`Self::set_arming_status`] even
    /// if classification fails.
    pub fn process_image(&mut self, image: V::Image) -> Result<()> {
        let cat = self
            .classifier
            .contains_cat(&image, self.config.cat_confidence_threshold);
        self.current_image = Some(image);
        self.cat_detected(cat?)
    }

    fn cat_detected(&mut self, cat: bool) -> Result<()> {
        debug!("Cat detected: {}", cat);
        if cat && self.store.arming_status()? == ArmingStatus::ArmedHome {
            info!("Cat detected while armed at home");
            self.set_alarm_status(AlarmStatus::Alarm)?;
        } else if !cat && !self.store.sensors()?.iter().any(|s| s.active) {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }

        self.listeners.cat_detected(cat);
        Ok(())
    }

    // --- Sensors ---

    /// Activate or deactivate a tracked sensor.
    ///
    /// A call that would not change the stored flag does nothing at all. Once
    /// the alarm has fired, sensor changes no longer move it.
    pub fn change_sensor_activation_status(&mut self, sensor: &Sensor, active: bool) -> Result<()> {
        let stored = self
            .store
            .sensor(sensor)?
            .ok_or_else(|| SecurityError::UnknownSensor {
                name: sensor.name.clone(),
                sensor_type: sensor.sensor_type,
            })?;
        if stored.active == active {
            debug!("Sensor {} already {}", stored.name, if active { "active" } else { "inactive" });
            return Ok(());
        }

        self.store.update_sensor(stored.with_active(active))?;
        self.listeners.sensors_changed();

        let alarm = self.store.alarm_status()?;
        if alarm == AlarmStatus::Alarm {
            return Ok(());
        }

        let next = if active {
            if self.store.arming_status()? == ArmingStatus::Disarmed {
                return Ok(());
            }
            alarm.after_activation()
        } else {
            alarm.after_deactivation()
        };
        if let Some(next) = next {
            self.set_alarm_status(next)?;
        }
        Ok(())
    }

    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        debug!("Adding sensor {}", sensor);
        self.store.add_sensor(sensor)?;
        self.listeners.sensors_changed();
        Ok(())
    }

    /// Stop tracking a sensor. Listeners only hear about it if the sensor
    /// was actually tracked.
    pub fn remove_sensor(&mut self, sensor: &Sensor) -> Result<()> {
        debug!("Removing sensor {} ({})", sensor.name, sensor.sensor_type);
        if self.store.remove_sensor(sensor)? {
            self.listeners.sensors_changed();
        } else {
            debug!("Sensor {} was not tracked", sensor.name);
        }
        Ok(())
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        self.store.sensors()
    }

    // --- Status ---

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        debug!("Alarm status -> {}", status);
        self.store.set_alarm_status(status)?;
        self.listeners.alarm_status(status);
        Ok(())
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        self.store.alarm_status()
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        self.store.arming_status()
    }

    // --- Listeners ---

    /// Register a listener. Registering the same `Arc` twice is a no-op.
    pub fn add_status_listener(&mut self, listener: Arc<dyn StatusListener>) -> bool {
        self.listeners.add(listener)
    }

    /// Unregister a listener. Unknown listeners are ignored.
    pub fn remove_status_listener(&mut self, listener: &Arc<dyn StatusListener>) -> bool {
        self.listeners.remove(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
