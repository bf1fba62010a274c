use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::value::{Bilateral, MeasurementValue};

/// One functional-assessment visit. The seven domain blocks are fixed-shape:
/// every measurement field is always present and defaults to the NT
/// sentinel, so downstream scoring and comparison never needs a presence
/// check. Normalization happens once, here, when a stored record is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub date: jiff::civil::Date,
    #[serde(default)]
    pub clinimetrics: ClinimetricsBlock,
    #[serde(default)]
    pub flexibility: FlexibilityBlock,
    #[serde(default)]
    pub balance: BalanceBlock,
    #[serde(default)]
    pub gait: GaitBlock,
    #[serde(default)]
    pub endurance: EnduranceBlock,
    #[serde(default)]
    pub aerobic: AerobicBlock,
    #[serde(default)]
    pub power: PowerBlock,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Visit {
    /// Load a stored visit snapshot. This is the one place absent
    /// measurement fields normalize to NT; everything downstream can rely
    /// on the blocks being fully populated.
    pub fn from_snapshot(json: &str) -> Result<Visit, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinimetricsBlock {
    pub bmi: MeasurementValue,
    pub waist: MeasurementValue,
    /// Orthostatic blood-pressure drop; judged against an advisory rule
    /// rather than a numeric band.
    pub obp: MeasurementValue,
    pub grip: Bilateral,
    pub comments: String,
    /// Cached subtotal written back by the caller; never read as a scoring
    /// input.
    pub subtotal: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexibilityBlock {
    pub bscratch: Bilateral,
    pub snr: Bilateral,
    pub shflex: MeasurementValue,
    pub comments: String,
    pub subtotal: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceBlock {
    pub slseo: Bilateral,
    pub slsec: Bilateral,
    pub freach: MeasurementValue,
    pub sway: MeasurementValue,
    pub comments: String,
    pub subtotal: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitBlock {
    pub gspeed: MeasurementValue,
    pub tug: MeasurementValue,
    pub tugdt: MeasurementValue,
    pub srt: MeasurementValue,
    pub comments: String,
    pub subtotal: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnduranceBlock {
    pub cs30: MeasurementValue,
    pub acurl: Bilateral,
    pub wsit: MeasurementValue,
    pub comments: String,
    pub subtotal: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AerobicBlock {
    pub twd: MeasurementValue,
    pub step2: MeasurementValue,
    pub comments: String,
    pub subtotal: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerBlock {
    pub scp: MeasurementValue,
    pub sts5: MeasurementValue,
    pub vjump: MeasurementValue,
    pub comments: String,
    pub subtotal: Option<u32>,
}
