//! stride-report
//!
//! Two-visit comparison assembly: structured, ordered rows pairing each
//! measurement with its normative reference and both visits' readings.
//! The rows are the contract — a UI table or document exporter consumes
//! them; this crate never lays out pages.

pub mod compare;
pub mod error;
pub mod format;

use stride_core::models::patient::Patient;
use stride_core::models::visit::Visit;
use stride_norms::tables::NormativeTables;

use compare::ComparisonRow;
use error::ReportError;

/// Build a comparison against the standard instrument tables.
pub fn build_comparison(
    patient: &Patient,
    visits: &[Visit],
) -> Result<Vec<ComparisonRow>, ReportError> {
    compare::build_comparison(patient, visits, NormativeTables::standard())
}
