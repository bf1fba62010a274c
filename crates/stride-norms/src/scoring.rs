use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use stride_core::models::patient::Gender;
use stride_core::models::value::{MeasurementValue, Side};
use stride_core::models::visit::Visit;

use crate::catalog::{DomainId, MeasurementKey, PlausibleRange, Recorded};
use crate::error::NormsError;
use crate::tables::{NormativeRange, NormativeTables};

/// Total score at or above which a visit classifies as low risk.
pub const LOW_RISK_FLOOR: u32 = 17;
/// Total score at or above which a visit classifies as moderate risk.
pub const MODERATE_RISK_FLOOR: u32 = 9;

/// Three-tier clinical interpretation of the total score. Fixed constants
/// of the instrument, not per-call configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_total(total: u32) -> RiskLevel {
        if total >= LOW_RISK_FLOOR {
            RiskLevel::Low
        } else if total >= MODERATE_RISK_FLOOR {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }
}

/// Count of passing measurements within one domain.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DomainScore {
    pub domain: DomainId,
    pub subtotal: u32,
}

/// Derived scoring result for one visit. Never persisted by the engine;
/// recomputing with the same inputs yields the same result.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    /// One entry per domain, in catalog order.
    pub domain_scores: Vec<DomainScore>,
    pub total: u32,
    pub risk: RiskLevel,
}

/// Pass/fail contribution of one recorded value against its normative
/// range: NT contributes nothing (excluded, not failed), an empty or
/// advisory-only range is not auto-scorable, numeric bounds are inclusive.
pub fn score_measurement(value: &MeasurementValue, range: &NormativeRange) -> u32 {
    let Some(v) = value.numeric() else {
        return 0;
    };
    let pass = match (range.min, range.max) {
        (Some(min), Some(max)) => v >= min && v <= max,
        (Some(min), None) => v >= min,
        (None, Some(max)) => v <= max,
        (None, None) => false,
    };
    pass as u32
}

/// Score a visit against the supplied tables: per-domain subtotals in
/// catalog order, bilateral measurements contributing once per side, then
/// the total and its risk level.
pub fn score_visit(
    visit: &Visit,
    age: i16,
    gender: Gender,
    tables: &NormativeTables,
) -> Result<ScoreResult, NormsError> {
    if age < 0 {
        return Err(NormsError::InvalidAge(age));
    }

    let mut domain_scores = Vec::with_capacity(DomainId::ALL.len());
    let mut total = 0;
    for domain in DomainId::ALL {
        let mut subtotal = 0;
        for key in domain.measurements() {
            let range = tables.resolve(*key, age, gender)?;
            match key.read(visit) {
                Recorded::Single(value) => subtotal += score_measurement(value, &range),
                Recorded::Bilateral(pair) => {
                    for side in Side::BOTH {
                        subtotal += score_measurement(pair.side(side), &range);
                    }
                }
            }
        }
        total += subtotal;
        domain_scores.push(DomainScore { domain, subtotal });
    }

    Ok(ScoreResult {
        domain_scores,
        total,
        risk: RiskLevel::from_total(total),
    })
}

/// An entered value outside its measurement's recordable bounds.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub code: String,
    pub value: f64,
    pub expected: PlausibleRange,
    pub message: String,
}

/// Check every recorded value on a visit against its plausible bounds.
/// NT is never a validation error; it is a legitimate outcome, not data.
pub fn validate_visit(visit: &Visit) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for domain in DomainId::ALL {
        for key in domain.measurements() {
            match key.read(visit) {
                Recorded::Single(value) => {
                    check_value(*key, key.code().to_string(), value, &mut errors);
                }
                Recorded::Bilateral(pair) => {
                    for side in Side::BOTH {
                        let code = format!("{} {}", key.code(), side.suffix());
                        check_value(*key, code, pair.side(side), &mut errors);
                    }
                }
            }
        }
    }
    errors
}

fn check_value(
    key: MeasurementKey,
    code: String,
    value: &MeasurementValue,
    errors: &mut Vec<ValidationError>,
) {
    let Some(v) = value.numeric() else {
        return;
    };
    let expected = key.plausible_range();
    if !expected.contains(v) {
        errors.push(ValidationError {
            code,
            value: v,
            expected,
            message: format!(
                "{}: recorded value {} is outside range [{}, {}]",
                key.label(),
                v,
                expected.min,
                expected.max,
            ),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nt_contributes_zero_regardless_of_range() {
        let nt = MeasurementValue::NotTested;
        assert_eq!(score_measurement(&nt, &NormativeRange::at_least(30.0)), 0);
        assert_eq!(score_measurement(&nt, &NormativeRange::between(0.0, 100.0)), 0);
        assert_eq!(score_measurement(&nt, &NormativeRange::empty()), 0);
    }

    #[test]
    fn empty_range_contributes_zero() {
        let v = MeasurementValue::Number(50.0);
        assert_eq!(score_measurement(&v, &NormativeRange::empty()), 0);
    }

    #[test]
    fn advisory_only_range_is_not_auto_scorable() {
        let v = MeasurementValue::Number(15.0);
        let range = NormativeRange::advisory("≤ 20/10 mmHg drop");
        assert_eq!(score_measurement(&v, &range), 0);
    }

    #[test]
    fn advisory_with_numeric_bound_scores_numerically() {
        let range = NormativeRange::at_most(1200.0).with_text("< 1200 ms");
        assert_eq!(score_measurement(&MeasurementValue::Number(950.0), &range), 1);
        assert_eq!(score_measurement(&MeasurementValue::Number(1450.0), &range), 0);
    }

    #[test]
    fn bounds_are_inclusive() {
        let both = NormativeRange::between(10.0, 20.0);
        assert_eq!(score_measurement(&MeasurementValue::Number(10.0), &both), 1);
        assert_eq!(score_measurement(&MeasurementValue::Number(20.0), &both), 1);
        assert_eq!(score_measurement(&MeasurementValue::Number(9.9), &both), 0);
        assert_eq!(score_measurement(&MeasurementValue::Number(20.1), &both), 0);

        let min_only = NormativeRange::at_least(80.0);
        assert_eq!(score_measurement(&MeasurementValue::Number(80.0), &min_only), 1);

        let max_only = NormativeRange::at_most(9.0);
        assert_eq!(score_measurement(&MeasurementValue::Number(9.0), &max_only), 1);
    }

    #[test]
    fn compound_values_score_on_their_magnitude() {
        use stride_core::models::value::{CurlWeight, WalkProtocol};
        let walk = MeasurementValue::Walk {
            distance: 505.0,
            protocol: WalkProtocol::SixMinute,
        };
        assert_eq!(score_measurement(&walk, &NormativeRange::at_least(480.0)), 1);

        let curl = MeasurementValue::Weighted {
            reps: 11.0,
            weight: CurlWeight::Lb8,
        };
        assert_eq!(score_measurement(&curl, &NormativeRange::at_least(15.0)), 0);
    }

    #[test]
    fn risk_thresholds_match_the_instrument() {
        assert_eq!(RiskLevel::from_total(17), RiskLevel::Low);
        assert_eq!(RiskLevel::from_total(16), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_total(9), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_total(8), RiskLevel::High);
        assert_eq!(RiskLevel::from_total(0), RiskLevel::High);
        assert_eq!(RiskLevel::from_total(29), RiskLevel::Low);
    }

    #[test]
    fn risk_is_monotonic_in_total() {
        fn rank(r: RiskLevel) -> u8 {
            match r {
                RiskLevel::High => 0,
                RiskLevel::Moderate => 1,
                RiskLevel::Low => 2,
            }
        }
        let mut prev = rank(RiskLevel::from_total(0));
        for total in 1..=30 {
            let next = rank(RiskLevel::from_total(total));
            assert!(next >= prev, "risk regressed at total {total}");
            prev = next;
        }
    }
}
