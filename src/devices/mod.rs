// MIT License - Copyright (c) 2026 Peter Wright

pub mod sensor;

pub use sensor::{Sensor, SensorType};
