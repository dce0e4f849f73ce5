//! Measurement - Input Validation
//!
//! Turns a raw key/value request body into a validated `Measurement`.
//! Every check is pure; the first failing field is reported.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DiagnosticError, DiagnosticResult};

// ============================================================================
// FIELD SPECS
// ============================================================================

/// Resistance used when the request omits it (ohms)
pub const DEFAULT_RESISTANCE: f64 = 0.03;

/// Fields that must be present in every request, in check order
pub const REQUIRED_FIELDS: [&str; 4] = ["voltage", "current", "temperature", "age_months"];

/// Closed physical range for one field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    fn check(&self, value: f64) -> DiagnosticResult<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(DiagnosticError::out_of_range(self.field, self.min, self.max))
        }
    }
}

pub const VOLTAGE_RANGE: FieldRange = FieldRange::new("voltage", 10.5, 13.0);
pub const CURRENT_RANGE: FieldRange = FieldRange::new("current", 50.0, 350.0);
pub const TEMPERATURE_RANGE: FieldRange = FieldRange::new("temperature", -30.0, 60.0);
pub const AGE_MONTHS_RANGE: FieldRange = FieldRange::new("age_months", 1.0, 120.0);
pub const RESISTANCE_RANGE: FieldRange = FieldRange::new("resistance", 0.01, 0.15);

// ============================================================================
// MEASUREMENT
// ============================================================================

/// One validated battery reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Volts
    pub voltage: f64,
    /// Amperes
    pub current: f64,
    /// Degrees Celsius
    pub temperature: f64,
    pub age_months: u32,
    /// Ohms
    pub resistance: f64,
}

impl Measurement {
    /// Build from typed values, applying the same range checks as `validate`
    pub fn new(
        voltage: f64,
        current: f64,
        temperature: f64,
        age_months: u32,
        resistance: f64,
    ) -> DiagnosticResult<Self> {
        let finite = [
            ("voltage", voltage),
            ("current", current),
            ("temperature", temperature),
            ("resistance", resistance),
        ];
        if let Some((field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DiagnosticError::InvalidFormat(field.to_string()));
        }

        check_ranges(voltage, current, temperature, age_months as f64, resistance)?;

        Ok(Self {
            voltage,
            current,
            temperature,
            age_months,
            resistance,
        })
    }
}

/// Range checks in field order; the first violation wins
fn check_ranges(
    voltage: f64,
    current: f64,
    temperature: f64,
    age_months: f64,
    resistance: f64,
) -> DiagnosticResult<()> {
    VOLTAGE_RANGE.check(voltage)?;
    CURRENT_RANGE.check(current)?;
    TEMPERATURE_RANGE.check(temperature)?;
    AGE_MONTHS_RANGE.check(age_months)?;
    RESISTANCE_RANGE.check(resistance)?;
    Ok(())
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Validate a raw request body
///
/// Order: presence of required fields, numeric parsing, physical ranges.
pub fn validate(raw: &Map<String, Value>) -> DiagnosticResult<Measurement> {
    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !raw.contains_key(**f)) {
        return Err(DiagnosticError::MissingField(missing.to_string()));
    }

    let voltage = parse_float(raw, "voltage")?;
    let current = parse_float(raw, "current")?;
    let temperature = parse_float(raw, "temperature")?;
    let age_months = parse_count(raw, "age_months")?;
    let resistance = match raw.get("resistance") {
        Some(_) => parse_float(raw, "resistance")?,
        None => DEFAULT_RESISTANCE,
    };

    check_ranges(voltage, current, temperature, age_months as f64, resistance)?;

    // In range, so it fits
    let age_months = u32::try_from(age_months).map_err(|_| {
        DiagnosticError::out_of_range("age_months", AGE_MONTHS_RANGE.min, AGE_MONTHS_RANGE.max)
    })?;

    Ok(Measurement {
        voltage,
        current,
        temperature,
        age_months,
        resistance,
    })
}

fn invalid(field: &str) -> DiagnosticError {
    DiagnosticError::InvalidFormat(field.to_string())
}

/// Numbers and numeric strings; anything non-finite is rejected
fn parse_float(raw: &Map<String, Value>, field: &str) -> DiagnosticResult<f64> {
    let value = match raw.get(field) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    value.filter(|v| v.is_finite()).ok_or_else(|| invalid(field))
}

/// Whole number; integer-valued floats and digit strings are accepted.
/// Sign and magnitude are left to the range check.
fn parse_count(raw: &Map<String, Value>, field: &str) -> DiagnosticResult<i64> {
    let value = match raw.get(field) {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Some(i),
            None => n.as_f64().and_then(whole_number),
        },
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    value.ok_or_else(|| invalid(field))
}

fn whole_number(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

// ============================================================================
// TESTS
// ============================================================================
