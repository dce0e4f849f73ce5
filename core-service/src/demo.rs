//! Demo UI - text rendering and interactive form
//!
//! Backs the `battery-demo` binary: one form field per measurement, one
//! text box for the result.

use std::io::{BufRead, Write};

use crate::error::{DiagnosticError, DiagnosticResult};
use crate::logic::diagnosis::DiagnosticReport;
use crate::logic::measurement::Measurement;

/// Form defaults (a typical healthy 12 V battery)
pub const DEFAULT_VOLTAGE: f64 = 12.6;
pub const DEFAULT_CURRENT: f64 = 150.0;
pub const DEFAULT_TEMPERATURE: f64 = 25.0;
pub const DEFAULT_AGE_MONTHS: u32 = 24;
pub const DEFAULT_RESISTANCE: f64 = 0.03;

/// Render a report for the demo's text box
pub fn render_text(report: &DiagnosticReport) -> String {
    let risks = if report.risk_factors.is_empty() {
        "none".to_string()
    } else {
        report
            .risk_factors
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Status: {}\nConfidence: {:.1}%\nProbabilities: Healthy {:.1}%, Weak {:.1}%, Failed {:.1}%\nRisk factors: {}\nRecommendations: {}",
        report.status,
        report.confidence,
        report.probabilities.healthy,
        report.probabilities.weak,
        report.probabilities.failed,
        risks,
        report.recommendations.join("; "),
    )
}

/// Ask for each field on `output`, reading answers from `input`.
/// An empty answer keeps the default shown in brackets.
pub fn prompt_measurement<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> DiagnosticResult<Measurement> {
    let voltage = prompt(input, output, "Voltage (V)", "voltage", DEFAULT_VOLTAGE)?;
    let current = prompt(input, output, "Current (A)", "current", DEFAULT_CURRENT)?;
    let temperature = prompt(input, output, "Temperature (°C)", "temperature", DEFAULT_TEMPERATURE)?;
    let age_months = prompt(input, output, "Age (months)", "age_months", DEFAULT_AGE_MONTHS)?;
    let resistance = prompt(input, output, "Resistance (Ω)", "resistance", DEFAULT_RESISTANCE)?;

    Measurement::new(voltage, current, temperature, age_months, resistance)
}

fn prompt<R, W, T>(input: &mut R, output: &mut W, label: &str, field: &str, default: T) -> DiagnosticResult<T>
where
    R: BufRead,
    W: Write,
    T: std::str::FromStr + std::fmt::Display,
{
    let io_error = |e: std::io::Error| DiagnosticError::MalformedRequest(e.to_string());

    write!(output, "{} [{}]: ", label, default).map_err(io_error)?;
    output.flush().map_err(io_error)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(io_error)?;

    let answer = line.trim();
    if answer.is_empty() {
        return Ok(default);
    }
    answer
        .parse()
        .map_err(|_| DiagnosticError::InvalidFormat(field.to_string()))
}
