// MIT License - Copyright (c) 2026 Peter Wright

//! Line-oriented operator commands for the `catpoint` console.

use std::path::PathBuf;

use crate::devices::sensor::{Sensor, SensorType};
use crate::status::ArmingStatus;

pub const HELP: &str = "\
Commands:
  arm home|away              arm the system
  disarm                     disarm the system and clear the alarm
  add <type> <name>          track a new sensor (type: door, window, motion)
  remove <type> <name>       stop tracking a sensor
  activate <type> <name>     mark a sensor active
  deactivate <type> <name>   mark a sensor inactive
  image <path>               run cat detection on an image file
  status                     show arming and alarm status
  sensors                    list sensors
  help                       show this text
  quit                       exit";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Arm(ArmingStatus),
    Disarm,
    AddSensor(Sensor),
    RemoveSensor(Sensor),
    SetActive { sensor: Sensor, active: bool },
    Image(PathBuf),
    Status,
    Sensors,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parse one input line. Sensor names may contain spaces.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "arm" => match rest.parse::<ArmingStatus>()? {
                ArmingStatus::Disarmed => Ok(Self::Disarm),
                mode => Ok(Self::Arm(mode)),
            },
            "disarm" => Ok(Self::Disarm),
            "add" => Ok(Self::AddSensor(parse_sensor(rest)?)),
            "remove" => Ok(Self::RemoveSensor(parse_sensor(rest)?)),
            "activate" => Ok(Self::SetActive {
                sensor: parse_sensor(rest)?,
                active: true,
            }),
            "deactivate" => Ok(Self::SetActive {
                sensor: parse_sensor(rest)?,
                active: false,
            }),
            "image" if !rest.is_empty() => Ok(Self::Image(PathBuf::from(rest))),
            "image" => Err("usage: image <path>".to_string()),
            "status" => Ok(Self::Status),
            "sensors" => Ok(Self::Sensors),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn parse_sensor(args: &str) -> Result<Sensor, String> {
    let (kind, name) = args
        .split_once(char::is_whitespace)
        .ok_or_else(|| "expected <type> <name>".to_string())?;
    let name = name.trim();
    if name.is_empty() {
        return Err("sensor name must not be empty".to_string());
    }
    Ok(Sensor::new(name, kind.parse::<SensorType>()?))
}
