//! Diagnostic Composer
//!
//! Pure: identical measurement + classification always yields an
//! identical report.

use super::rules::*;
use super::types::{ClassProbabilities, DiagnosticReport, RiskFactor};
use crate::logic::measurement::Measurement;
use crate::logic::model::{ClassificationResult, HealthClass};

/// Build the report for one request
pub fn compose(measurement: &Measurement, classification: &ClassificationResult) -> DiagnosticReport {
    let class = classification.class;

    DiagnosticReport {
        status: class.status(),
        prediction: class.label(),
        confidence: percent(classification.probability(class)),
        probabilities: ClassProbabilities {
            healthy: percent(classification.probability(HealthClass::Healthy)),
            weak: percent(classification.probability(HealthClass::Weak)),
            failed: percent(classification.probability(HealthClass::Failed)),
        },
        risk_factors: assess_risk_factors(measurement),
        recommendations: recommendations_for(class),
        input_values: *measurement,
    }
}

/// Risk factors depend only on the measurement
pub fn assess_risk_factors(m: &Measurement) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if m.voltage < LOW_VOLTAGE_THRESHOLD {
        factors.push(RiskFactor::LowVoltage);
    }
    if m.age_months > HIGH_AGE_MONTHS {
        factors.push(RiskFactor::HighAge);
    }
    if m.resistance > HIGH_RESISTANCE_THRESHOLD {
        factors.push(RiskFactor::HighResistance);
    }
    if m.temperature < TEMPERATURE_MIN || m.temperature > TEMPERATURE_MAX {
        factors.push(RiskFactor::ExtremeTemperature);
    }

    factors
}

/// Recommendations depend only on the predicted class
pub fn recommendations_for(class: HealthClass) -> Vec<String> {
    recommendation_table(class).iter().map(|s| s.to_string()).collect()
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percent(probability: f64) -> f64 {
    round1(probability * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(voltage: f64, temperature: f64, age_months: u32, resistance: f64) -> Measurement {
        Measurement::new(voltage, 150.0, temperature, age_months, resistance).unwrap()
    }

    fn classified(label: i64, probabilities: [f32; 3]) -> ClassificationResult {
        ClassificationResult::new(label, &probabilities).unwrap()
    }

    #[test]
    fn test_healthy_example() {
        let m = measurement(12.6, 25.0, 24, 0.03);
        let report = compose(&m, &classified(0, [0.92, 0.06, 0.02]));

        assert_eq!(report.status, "Healthy ✅");
        assert_eq!(report.prediction, 0);
        assert_eq!(report.confidence, 92.0);
        assert_eq!(report.probabilities.healthy, 92.0);
        assert_eq!(report.probabilities.weak, 6.0);
        assert_eq!(report.probabilities.failed, 2.0);
        assert!(report.risk_factors.is_empty());
        assert_eq!(
            report.recommendations,
            vec!["Battery is in good condition", "Regular maintenance recommended"]
        );
        assert_eq!(report.input_values, m);
    }

    #[test]
    fn test_confidence_is_predicted_class_probability() {
        let m = measurement(12.6, 25.0, 24, 0.03);
        let c = classified(1, [0.3333, 0.4444, 0.2223]);
        let report = compose(&m, &c);
        assert_eq!(report.confidence, round1(c.probabilities[1] * 100.0));
        assert_eq!(report.confidence, 44.4);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let m = measurement(12.6, 25.0, 24, 0.03);
        let distributions = [
            [0.92, 0.06, 0.02],
            [0.3333, 0.3333, 0.3334],
            [0.001, 0.004, 0.995],
            [0.1234, 0.5678, 0.3088],
        ];
        for probs in distributions {
            let report = compose(&m, &classified(0, probs));
            assert!((report.probabilities.total() - 100.0).abs() <= 0.1 + 1e-9, "{:?}", probs);
        }
    }

    #[test]
    fn test_percentages_sum_to_100_when_model_output_drifts() {
        let m = measurement(12.6, 25.0, 24, 0.03);
        let distributions = [
            [0.5, 0.3, 0.195],
            [0.5, 0.3, 0.205],
            [0.333, 0.333, 0.333],
            [0.1, 0.2, 0.695],
        ];
        for probs in distributions {
            let report = compose(&m, &classified(0, probs));
            assert!((report.probabilities.total() - 100.0).abs() <= 0.1, "{:?}", probs);
        }

        let report = compose(&m, &classified(0, [0.5, 0.3, 0.195]));
        assert_eq!(report.confidence, 50.3);
        assert_eq!(report.probabilities.failed, 19.6);
    }

    #[test]
    fn test_recommendations_by_label() {
        assert_eq!(recommendations_for(HealthClass::Weak).len(), 3);
        assert_eq!(recommendations_for(HealthClass::Failed)[0], "Replace battery immediately");

        let m1 = measurement(12.6, 25.0, 24, 0.03);
        let m2 = measurement(10.8, -20.0, 100, 0.12);
        let c = classified(2, [0.05, 0.15, 0.8]);
        assert_eq!(compose(&m1, &c).recommendations, compose(&m2, &c).recommendations);
        assert_eq!(compose(&m1, &c).status, "Failed ❌");
    }

    #[test]
    fn test_risk_factors_independent_of_label() {
        let m = measurement(11.5, 45.0, 60, 0.08);
        let a = compose(&m, &classified(0, [0.9, 0.05, 0.05]));
        let b = compose(&m, &classified(2, [0.05, 0.05, 0.9]));
        assert_eq!(a.risk_factors, b.risk_factors);
        assert_eq!(
            a.risk_factors,
            vec![
                RiskFactor::LowVoltage,
                RiskFactor::HighAge,
                RiskFactor::HighResistance,
                RiskFactor::ExtremeTemperature,
            ]
        );
    }

    #[test]
    fn test_age_boundary() {
        assert!(assess_risk_factors(&measurement(12.6, 25.0, 49, 0.03)).contains(&RiskFactor::HighAge));
        assert!(!assess_risk_factors(&measurement(12.6, 25.0, 48, 0.03)).contains(&RiskFactor::HighAge));
    }

    #[test]
    fn test_resistance_boundary() {
        assert!(!assess_risk_factors(&measurement(12.6, 25.0, 24, 0.05)).contains(&RiskFactor::HighResistance));
        assert!(assess_risk_factors(&measurement(12.6, 25.0, 24, 0.0501)).contains(&RiskFactor::HighResistance));
    }

    #[test]
    fn test_voltage_boundary() {
        assert!(!assess_risk_factors(&measurement(12.0, 25.0, 24, 0.03)).contains(&RiskFactor::LowVoltage));
        assert!(assess_risk_factors(&measurement(11.99, 25.0, 24, 0.03)).contains(&RiskFactor::LowVoltage));
    }

    #[test]
    fn test_temperature_window() {
        for t in [-10.0, 0.0, 35.0] {
            assert!(!assess_risk_factors(&measurement(12.6, t, 24, 0.03)).contains(&RiskFactor::ExtremeTemperature));
        }
        for t in [-10.5, -30.0, 35.5, 41.0, 60.0] {
            assert!(assess_risk_factors(&measurement(12.6, t, 24, 0.03)).contains(&RiskFactor::ExtremeTemperature));
        }
    }

    #[test]
    fn test_lists_have_no_duplicates() {
        let m = measurement(10.6, -25.0, 120, 0.15);
        for class in HealthClass::ALL {
            let probs = match class {
                HealthClass::Healthy => [0.8, 0.1, 0.1],
                HealthClass::Weak => [0.1, 0.8, 0.1],
                HealthClass::Failed => [0.1, 0.1, 0.8],
            };
            let report = compose(&m, &classified(class.label() as i64, probs));
            let mut recs = report.recommendations.clone();
            recs.sort();
            recs.dedup();
            assert_eq!(recs.len(), report.recommendations.len());
            assert!(!report.recommendations.is_empty());

            let mut risks = report.risk_factors.clone();
            risks.dedup();
            assert_eq!(risks.len(), report.risk_factors.len());
        }
    }

    #[test]
    fn test_serialized_shape() {
        let m = measurement(11.5, 25.0, 24, 0.03);
        let report = compose(&m, &classified(1, [0.2, 0.7, 0.1]));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["status"], "Weak ⚠️");
        assert_eq!(json["prediction"], 1);
        assert_eq!(json["probabilities"]["weak"], 70.0);
        assert_eq!(json["risk_factors"][0], "Low voltage");
        assert_eq!(json["input_values"]["age_months"], 24);
        assert_eq!(json["input_values"]["resistance"], 0.03);
    }
}
