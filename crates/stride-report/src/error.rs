use thiserror::Error;
use uuid::Uuid;

use stride_norms::error::NormsError;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A comparison is between exactly two visits, no more, no fewer.
    #[error("comparison requires exactly two visits, got {supplied}")]
    InvalidComparisonRequest { supplied: usize },

    /// A supplied visit does not belong to the supplied patient. The
    /// patient is passed explicitly — a disagreement is a caller error
    /// worth surfacing, never silently resolved from one of the visits.
    #[error("visit {visit_id} does not belong to patient {patient_id}")]
    PatientMismatch { patient_id: Uuid, visit_id: Uuid },

    #[error(transparent)]
    Norms(#[from] NormsError),
}
