//! Battery Health Demo
//!
//! Interactive front end over the diagnostic pipeline. Same model, same
//! report as the HTTP API, rendered as text.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;

use battery_health_core::demo::{self, render_text};
use battery_health_core::{diagnose_measurement, Measurement, ModelConfig, SharedModel};

#[derive(Debug, Parser)]
#[command(name = "battery-demo", version, about = "Battery Health Prediction - instant health assessment")]
struct Args {
    /// Voltage (V)
    #[arg(long, default_value_t = demo::DEFAULT_VOLTAGE, allow_negative_numbers = true)]
    voltage: f64,

    /// Current (A)
    #[arg(long, default_value_t = demo::DEFAULT_CURRENT, allow_negative_numbers = true)]
    current: f64,

    /// Temperature (°C)
    #[arg(long, default_value_t = demo::DEFAULT_TEMPERATURE, allow_negative_numbers = true)]
    temperature: f64,

    /// Age (months)
    #[arg(long, default_value_t = demo::DEFAULT_AGE_MONTHS)]
    age_months: u32,

    /// Resistance (Ω)
    #[arg(long, default_value_t = demo::DEFAULT_RESISTANCE)]
    resistance: f64,

    /// Prompt for each value instead of using flags; repeats until EOF
    #[arg(short, long)]
    interactive: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Classifier path (overrides BATTERY_MODEL_PATH)
    #[arg(long)]
    model: Option<std::path::PathBuf>,

    /// Scaler path (overrides BATTERY_SCALER_PATH)
    #[arg(long)]
    scaler: Option<std::path::PathBuf>,

    /// Download artifacts from this base URL (overrides BATTERY_MODEL_URL)
    #[arg(long)]
    model_url: Option<String>,
}

impl Args {
    fn model_config(&self) -> ModelConfig {
        let mut config = ModelConfig::from_env();
        if let Some(path) = &self.model {
            config.model_path = path.clone();
        }
        if let Some(path) = &self.scaler {
            config.scaler_path = path.clone();
        }
        if let Some(url) = &self.model_url {
            config.remote_base_url = Some(url.clone());
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = args.model_config();
    log::info!("Model source: {}", config.describe());
    let model = SharedModel::new(config.into_source());

    if !args.interactive {
        let measurement = Measurement::new(
            args.voltage,
            args.current,
            args.temperature,
            args.age_months,
            args.resistance,
        );
        let ok = run_once(measurement, &model, args.json)?;
        if !ok {
            std::process::exit(1);
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    println!("Battery Health Prediction");
    println!("Enter your battery parameters (press Enter to keep the default, Ctrl-D to quit).");

    loop {
        if input.fill_buf().context("failed to read stdin")?.is_empty() {
            break;
        }
        let measurement = demo::prompt_measurement(&mut input, &mut stdout);
        run_once(measurement, &model, args.json)?;
        writeln!(stdout)?;
    }

    Ok(())
}

/// Diagnose and print; returns false when the result was an error
fn run_once(
    measurement: battery_health_core::error::DiagnosticResult<Measurement>,
    model: &SharedModel,
    json: bool,
) -> anyhow::Result<bool> {
    let result = measurement.and_then(|m| diagnose_measurement(&m, model));

    match result {
        Ok(report) if json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(true)
        }
        Ok(report) => {
            println!("{}", render_text(&report));
            Ok(true)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(false)
        }
    }
}
