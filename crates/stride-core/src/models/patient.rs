use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Recorded gender, as used by the normative tables. A closed set: values
/// outside `M`/`F` fail deserialization at the snapshot boundary rather
/// than silently falling back to one gender's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: jiff::civil::Date,
    pub gender: Gender,
    /// Identifier in an external clinical record system, when linked.
    pub external_record_id: Option<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Patient {
    /// Age in whole years on the given date. Negative when the date
    /// precedes the date of birth; the resolver rejects that as
    /// `InvalidAge` rather than this method guessing.
    pub fn age_on(&self, date: jiff::civil::Date) -> i16 {
        let dob = self.date_of_birth;
        let mut age = date.year() - dob.year();
        if (date.month(), date.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        age
    }
}
