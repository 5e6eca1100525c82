// MIT License - Copyright (c) 2026 Peter Wright

use std::fmt;
use std::sync::Arc;

use crate::status::{AlarmStatus, ArmingStatus};

/// Receives pushed notifications from [`crate::SecurityService`].
///
/// Callbacks run synchronously inside the service call that triggered them.
pub trait StatusListener: Send + Sync {
    fn on_alarm_status(&self, status: AlarmStatus);

    fn on_arming_status(&self, status: ArmingStatus);

    /// The sensor list or a sensor's active flag changed.
    fn on_sensors_changed(&self);

    /// Raw result of the latest image classification.
    fn on_cat_detected(&self, cat: bool);
}

/// Listeners registered on one service, keyed by `Arc` identity.
///
/// Registering the same `Arc` twice has no effect, so each listener sees
/// each event exactly once. Delivery follows registration order.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Arc<dyn StatusListener>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Returns false if it was already registered.
    pub fn add(&mut self, listener: Arc<dyn StatusListener>) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove(&mut self, listener: &Arc<dyn StatusListener>) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !Arc::ptr_eq(l, listener));
        self.listeners.len() != before
    }

    pub fn contains(&self, listener: &Arc<dyn StatusListener>) -> bool {
        self.listeners.iter().any(|l| Arc::ptr_eq(l, listener))
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn alarm_status(&self, status: AlarmStatus) {
        self.listeners.iter().for_each(|l| l.on_alarm_status(status));
    }

    pub fn arming_status(&self, status: ArmingStatus) {
        self.listeners.iter().for_each(|l| l.on_arming_status(status));
    }

    pub fn sensors_changed(&self) {
        self.listeners.iter().for_each(|l| l.on_sensors_changed());
    }

    pub fn cat_detected(&self, cat: bool) {
        self.listeners.iter().for_each(|l| l.on_cat_detected(cat));
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.listeners.len())
            .finish()
    }
}
