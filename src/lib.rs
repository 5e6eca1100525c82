// MIT License - Copyright (c) 2026 Peter Wright
//
//! # catpoint
//!
//! Home security alarm controller. Tracks door, window and motion sensors,
//! an arming mode and a derived alarm status, and reacts to sensor changes
//! and camera cat detection.
//!
//! [`SecurityService`] holds all of the decision logic. Storage
//! ([`SensorStore`]) and image classification ([`VisionClassifier`]) are
//! collaborators behind traits; observers implement [`StatusListener`] and
//! are called synchronously on every change.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use catpoint::{
//!     AlarmStatus, ArmingStatus, EventBroadcaster, Frame, MemoryStore, RandomClassifier,
//!     SecurityService, Sensor, SensorType, StatusListener,
//! };
//!
//! # fn main() -> catpoint::Result<()> {
//! let mut service = SecurityService::new(MemoryStore::new(), RandomClassifier);
//!
//! let broadcaster = Arc::new(EventBroadcaster::new(64));
//! let mut events = broadcaster.subscribe();
//! let listener: Arc<dyn StatusListener> = broadcaster;
//! service.add_status_listener(listener);
//!
//! let window = Sensor::new("Bedroom", SensorType::Window);
//! service.add_sensor(window.clone())?;
//! service.set_arming_status(ArmingStatus::ArmedHome)?;
//! service.change_sensor_activation_status(&window, true)?;
//! assert_eq!(service.alarm_status()?, AlarmStatus::PendingAlarm);
//!
//! service.process_image(Frame::new("porch", vec![0xff, 0xd8]))?;
//!
//! while let Ok(event) = events.try_recv() {
//!     println!("Event: {:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod console;
pub mod constants;
pub mod devices;
pub mod error;
pub mod event;
pub mod listener;
pub mod service;
pub mod status;
pub mod store;
pub mod vision;

// Re-exports for convenience
pub use config::{SecurityConfig, SecurityConfigBuilder};
pub use devices::sensor::{Sensor, SensorType};
pub use error::{Result, SecurityError};
pub use event::{EventBroadcaster, EventReceiver, SecurityEvent};
pub use listener::{ListenerSet, StatusListener};
pub use service::SecurityService;
pub use status::{AlarmStatus, ArmingStatus};
pub use store::{JsonFileStore, MemoryStore, SensorStore};
pub use vision::{Frame, RandomClassifier, VisionClassifier};
