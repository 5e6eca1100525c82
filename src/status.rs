// MIT License - Copyright (c) 2026 Peter Wright

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operator-selected arming mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmingStatus {
    /// Armed while occupants are home; cat detection raises the alarm directly
    ArmedHome,
    /// Armed while nobody is home
    ArmedAway,
    /// Sensors cannot trigger anything
    #[default]
    Disarmed,
}

impl ArmingStatus {
    /// The wire string representation (e.g., "ARMED_HOME").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArmedHome => "ARMED_HOME",
            Self::ArmedAway => "ARMED_AWAY",
            Self::Disarmed => "DISARMED",
        }
    }

    /// Human-readable description, as shown on the console.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ArmedHome => "Armed - At Home",
            Self::ArmedAway => "Armed - Away",
            Self::Disarmed => "Disarmed",
        }
    }

    pub fn is_armed(&self) -> bool {
        !matches!(self, Self::Disarmed)
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArmingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "armed_home" | "home" => Ok(Self::ArmedHome),
            "armed_away" | "away" => Ok(Self::ArmedAway),
            "disarmed" => Ok(Self::Disarmed),
            other => Err(format!("unknown arming status: {other}")),
        }
    }
}

/// Alarm status derived by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    /// Grace period after a first sensor trip
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    /// The wire string representation (e.g., "PENDING_ALARM").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAlarm => "NO_ALARM",
            Self::PendingAlarm => "PENDING_ALARM",
            Self::Alarm => "ALARM",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::NoAlarm => "Cool and Good",
            Self::PendingAlarm => "I'm in Danger...",
            Self::Alarm => "Awooga!",
        }
    }

    /// Next status after an armed sensor trips, or `None` to stay put.
    pub fn after_activation(self) -> Option<Self> {
        match self {
            Self::NoAlarm => Some(Self::PendingAlarm),
            Self::PendingAlarm => Some(Self::Alarm),
            Self::Alarm => None,
        }
    }

    /// Next status after a sensor goes quiet, or `None` to stay put.
    pub fn after_deactivation(self) -> Option<Self> {
        match self {
            Self::PendingAlarm => Some(Self::NoAlarm),
            Self::NoAlarm | Self::Alarm => None,
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlarmStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no_alarm" => Ok(Self::NoAlarm),
            "pending_alarm" => Ok(Self::PendingAlarm),
            "alarm" => Ok(Self::Alarm),
            other => Err(format!("unknown alarm status: {other}")),
        }
    }
}
