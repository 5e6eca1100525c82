// MIT License - Copyright (c) 2026 Peter Wright

use serde::Serialize;

use crate::listener::StatusListener;
use crate::status::{AlarmStatus, ArmingStatus};

/// All events that can be emitted by the security service.
///
/// Users subscribe via [`EventBroadcaster::subscribe`] to receive a
/// `tokio::sync::broadcast::Receiver<SecurityEvent>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityEvent {
    /// Alarm status written by the controller
    AlarmStatusChanged(AlarmStatus),
    /// Arming mode set by the operator
    ArmingStatusChanged(ArmingStatus),
    /// Sensor added, removed, or (de)activated
    SensorsChanged,
    /// Result of classifying a camera frame
    CatDetected(bool),
}

impl SecurityEvent {
    /// Operation name used in the JSON form.
    pub fn op(&self) -> &'static str {
        match self {
            Self::AlarmStatusChanged(_) => "ALARM_STATUS",
            Self::ArmingStatusChanged(_) => "ARMING_STATUS",
            Self::SensorsChanged => "SENSORS_CHANGED",
            Self::CatDetected(_) => "CAT_DETECTED",
        }
    }

    /// JSON form of this event stamped with `now` (epoch milliseconds).
    pub fn to_message(&self, now: u64) -> EventMessage {
        let (status, cat) = match *self {
            Self::AlarmStatusChanged(s) => (Some(s.as_str()), None),
            Self::ArmingStatusChanged(s) => (Some(s.as_str()), None),
            Self::SensorsChanged => (None, None),
            Self::CatDetected(cat) => (None, Some(cat)),
        };
        EventMessage {
            now,
            op: self.op(),
            status,
            cat,
        }
    }
}

// Events share a flat {now, op, ...} structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventMessage {
    pub now: u64,
    pub op: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat: Option<bool>,
}

/// Current time in epoch milliseconds.
pub fn now_epoch_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

/// Type alias for the broadcast sender.
pub type EventSender = tokio::sync::broadcast::Sender<SecurityEvent>;

/// Type alias for the broadcast receiver.
pub type EventReceiver = tokio::sync::broadcast::Receiver<SecurityEvent>;

/// Create a new event channel with the given capacity.
pub fn event_channel(capacity: usize) -> (EventSender, EventReceiver) {
    tokio::sync::broadcast::channel(capacity)
}

/// Listener that republishes every callback on a broadcast channel.
///
/// Lets async consumers follow the service without holding its lock.
/// Events sent while nobody is subscribed are dropped.
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    tx: EventSender,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = event_channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.tx.subscribe()
    }

    fn send(&self, event: SecurityEvent) {
        let _ = self.tx.send(event);
    }
}

impl StatusListener for EventBroadcaster {
    fn on_alarm_status(&self, status: AlarmStatus) {
        self.send(SecurityEvent::AlarmStatusChanged(status));
    }

    fn on_arming_status(&self, status: ArmingStatus) {
        self.send(SecurityEvent::ArmingStatusChanged(status));
    }

    fn on_sensors_changed(&self) {
        self.send(SecurityEvent::SensorsChanged);
    }

    fn on_cat_detected(&self, cat: bool) {
        self.send(SecurityEvent::CatDetected(cat));
    }
}
