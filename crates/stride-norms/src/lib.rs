//! stride-norms
//!
//! The clinimetric scoring core: measurement catalog, age/gender-banded
//! normative reference tables, the per-measurement scorer, and the visit
//! aggregator. Pure data and arithmetic — no storage dependency.

pub mod catalog;
pub mod error;
pub mod resolver;
pub mod scoring;
pub mod tables;

use stride_core::models::patient::Gender;
use stride_core::models::visit::Visit;

use catalog::MeasurementKey;
use error::NormsError;
use scoring::ScoreResult;
use tables::{NormativeRange, NormativeTables};

/// Resolve a normative range against the standard instrument tables.
pub fn resolve_normative_range(
    key: MeasurementKey,
    age: i16,
    gender: Gender,
) -> Result<NormativeRange, NormsError> {
    NormativeTables::standard().resolve(key, age, gender)
}

/// Score a visit against the standard instrument tables.
pub fn score_visit(visit: &Visit, age: i16, gender: Gender) -> Result<ScoreResult, NormsError> {
    scoring::score_visit(visit, age, gender, NormativeTables::standard())
}
