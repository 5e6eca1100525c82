// MIT License - Copyright (c) 2026 Peter Wright
// Operator console

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use catpoint::console::{ConsoleCommand, HELP};
use catpoint::constants::{DEFAULT_CAT_CONFIDENCE_THRESHOLD, EVENT_CHANNEL_CAPACITY};
use catpoint::event::now_epoch_ms;
use catpoint::{
    EventBroadcaster, Frame, JsonFileStore, MemoryStore, RandomClassifier, SecurityConfig,
    SecurityService, SensorStore, StatusListener,
};

type Service = SecurityService<Box<dyn SensorStore>, RandomClassifier>;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "catpoint")]
#[command(about = "Home security alarm console with camera cat detection")]
struct Cli {
    /// Path to the TOML configuration file (optional)
    #[arg(long, default_value = "catpoint.toml")]
    config: PathBuf,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct Config {
    #[serde(default)]
    service: ServiceToml,
    #[serde(default)]
    store: StoreToml,
}

#[derive(Debug, Deserialize)]
struct ServiceToml {
    #[serde(default = "default_cat_confidence_threshold")]
    cat_confidence_threshold: f32,
}

impl Default for ServiceToml {
    fn default() -> Self {
        Self {
            cat_confidence_threshold: default_cat_confidence_threshold(),
        }
    }
}

fn default_cat_confidence_threshold() -> f32 {
    DEFAULT_CAT_CONFIDENCE_THRESHOLD
}

#[derive(Debug, Default, Deserialize)]
struct StoreToml {
    /// JSON file holding sensors and statuses. In-memory when omitted.
    #[serde(default)]
    path: Option<PathBuf>,
}

fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&text).context("Failed to parse config file")
}

fn build_service(config: &Config) -> Result<Service> {
    let store: Box<dyn SensorStore> = match &config.store.path {
        Some(path) => {
            let store = JsonFileStore::open(path).context("Failed to open sensor store")?;
            info!("Using sensor store at {}", store.path().display());
            Box::new(store)
        }
        None => Box::new(MemoryStore::new()),
    };
    let security_config = SecurityConfig::builder()
        .cat_confidence_threshold(config.service.cat_confidence_threshold)
        .build();
    Ok(SecurityService::with_config(store, RandomClassifier, security_config))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Run one console command. Returns false when the session should end.
fn handle_command(service: &mut Service, cmd: ConsoleCommand) -> Result<bool> {
    match cmd {
        ConsoleCommand::Arm(mode) => service.set_arming_status(mode)?,
        ConsoleCommand::Disarm => {
            service.set_arming_status(catpoint::ArmingStatus::Disarmed)?
        }
        ConsoleCommand::AddSensor(sensor) => service.add_sensor(sensor)?,
        ConsoleCommand::RemoveSensor(sensor) => service.remove_sensor(&sensor)?,
        ConsoleCommand::SetActive { sensor, active } => {
            service.change_sensor_activation_status(&sensor, active)?
        }
        ConsoleCommand::Image(path) => {
            let frame = Frame::from_file(&path)
                .with_context(|| format!("Failed to read image {}", path.display()))?;
            service.process_image(frame)?;
        }
        ConsoleCommand::Status => {
            let arming = service.arming_status()?;
            let alarm = service.alarm_status()?;
            println!("System: {} | Alarm: {}", arming.description(), alarm.description());
        }
        ConsoleCommand::Sensors => {
            let sensors = service.sensors()?;
            if sensors.is_empty() {
                println!("No sensors");
            }
            for sensor in sensors {
                println!("{sensor}");
            }
        }
        ConsoleCommand::Help => println!("{HELP}"),
        ConsoleCommand::Quit => return Ok(false),
    }
    Ok(true)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity (e.g. RUST_LOG=debug or RUST_LOG=catpoint=trace).
    // Default: info. Logs go to stderr; stdout carries events and command output.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // systemd journal already adds timestamps, so omit them when running under systemd
    if std::env::var_os("JOURNAL_STREAM").is_some() {
        tracing_subscriber::fmt()
            .without_time()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter)
            .init();
    }

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let mut service = build_service(&config)?;
    info!("Cat confidence threshold {}", service.config().cat_confidence_threshold);

    let broadcaster = Arc::new(EventBroadcaster::new(EVENT_CHANNEL_CAPACITY));
    let mut event_rx = broadcaster.subscribe();
    let listener: Arc<dyn StatusListener> = broadcaster;
    service.add_status_listener(listener);
    let service = Arc::new(Mutex::new(service));

    // Event printer: one JSON line per event
    let event_handle = tokio::spawn(async move {
        loop {
            match event_rx.recv().await {
                Ok(event) => match serde_json::to_string(&event.to_message(now_epoch_ms())) {
                    Ok(json) => println!("{json}"),
                    Err(e) => error!("Failed to serialize event: {e}"),
                },
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Event receiver lagged, missed {n} events");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                    debug!("Event channel closed");
                    break;
                }
            }
        }
    });

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!("Console ready. Type 'help' for commands.");
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => {
                info!("Received SIGINT, shutting down...");
                break;
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                break;
            }
        };
        let Some(line) = line else {
            debug!("stdin closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let cmd = match ConsoleCommand::parse(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };

        let mut service_lock = service.lock().await;
        match handle_command(&mut service_lock, cmd) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => error!("Command failed: {e:#}"),
        }
    }

    // Dropping the service drops the broadcaster, which closes the channel
    // once the printer has drained it
    drop(service);
    if let Err(e) = event_handle.await {
        warn!("Event printer ended abnormally: {e}");
    }

    info!("Shutdown complete");
    Ok(())
}
