use serde::{Deserialize, Serialize};
use ts_rs::TS;

use stride_core::models::patient::Patient;
use stride_core::models::value::Side;
use stride_core::models::visit::Visit;
use stride_norms::catalog::{DomainId, Recorded};
use stride_norms::tables::NormativeTables;

use crate::error::ReportError;
use crate::format::{format_normative_range, format_value};

/// One labeled line of a two-visit report. `value_a`/`value_b` hold the
/// formatted readings of the visits in the order they were supplied.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ComparisonRow {
    pub domain: DomainId,
    pub label: String,
    pub normative: String,
    pub value_a: String,
    pub value_b: String,
}

/// Assemble the comparison rows for exactly two visits of one patient,
/// grouped by domain in catalog order. Normative ranges are resolved at
/// the patient's age on the later of the two visit dates, so swapping the
/// visit order changes only which value column holds which reading.
pub fn build_comparison(
    patient: &Patient,
    visits: &[Visit],
    tables: &NormativeTables,
) -> Result<Vec<ComparisonRow>, ReportError> {
    let [visit_a, visit_b] = visits else {
        return Err(ReportError::InvalidComparisonRequest {
            supplied: visits.len(),
        });
    };
    for visit in [visit_a, visit_b] {
        if visit.patient_id != patient.id {
            return Err(ReportError::PatientMismatch {
                patient_id: patient.id,
                visit_id: visit.id,
            });
        }
    }

    let reference_date = visit_a.date.max(visit_b.date);
    let age = patient.age_on(reference_date);

    let mut rows = Vec::new();
    for domain in DomainId::ALL {
        for key in domain.measurements() {
            let normative = format_normative_range(&tables.resolve(*key, age, patient.gender)?);
            match (key.read(visit_a), key.read(visit_b)) {
                (Recorded::Single(a), Recorded::Single(b)) => rows.push(ComparisonRow {
                    domain,
                    label: key.label().to_string(),
                    normative: normative.clone(),
                    value_a: format_value(a),
                    value_b: format_value(b),
                }),
                (Recorded::Bilateral(a), Recorded::Bilateral(b)) => {
                    for side in Side::BOTH {
                        rows.push(ComparisonRow {
                            domain,
                            label: format!("{} {}", key.label(), side.suffix()),
                            normative: normative.clone(),
                            value_a: format_value(a.side(side)),
                            value_b: format_value(b.side(side)),
                        });
                    }
                }
                // A key reads with one cardinality; the visits share it.
                _ => unreachable!("cardinality differs between visits for {key:?}"),
            }
        }
        rows.push(comments_row(domain, visit_a, visit_b));
    }

    tracing::debug!(
        patient = %patient.id,
        rows = rows.len(),
        age,
        "assembled visit comparison"
    );
    Ok(rows)
}

fn comments_row(domain: DomainId, visit_a: &Visit, visit_b: &Visit) -> ComparisonRow {
    ComparisonRow {
        domain,
        label: "Comments".to_string(),
        normative: "-".to_string(),
        value_a: comment_text(domain.comments(visit_a)),
        value_b: comment_text(domain.comments(visit_b)),
    }
}

fn comment_text(comments: &str) -> String {
    if comments.is_empty() {
        "-".to_string()
    } else {
        comments.to_string()
    }
}
