use stride_core::models::patient::Gender;

use crate::catalog::MeasurementKey;
use crate::error::NormsError;
use crate::tables::{NormativeRange, NormativeTables};

impl NormativeTables {
    /// Resolve the normative range for a known measurement. Total for
    /// every non-negative age: bands are matched oldest-first and the
    /// terminal `from_age: 0` baseline always catches what the older
    /// bands do not.
    pub fn resolve(
        &self,
        key: MeasurementKey,
        age: i16,
        gender: Gender,
    ) -> Result<NormativeRange, NormsError> {
        if age < 0 {
            return Err(NormsError::InvalidAge(age));
        }
        let Some(gender_bands) = self.bands_for(key) else {
            // Tables injected without full coverage behave like the
            // tolerant code path: no reference available.
            return Ok(NormativeRange::empty());
        };
        let list = gender_bands.for_gender(gender);
        let matched = list
            .iter()
            .find(|b| age >= b.from_age)
            .or_else(|| list.last());
        Ok(matched.map(|b| b.range.clone()).unwrap_or_default())
    }

    /// String entry point used when a stored record carries a measurement
    /// code. Unknown codes yield the empty range — "no normative
    /// comparison available" is a normal outcome in scoring and
    /// comparison flows, not a fault.
    pub fn resolve_code(
        &self,
        code: &str,
        age: i16,
        gender: Gender,
    ) -> Result<NormativeRange, NormsError> {
        if age < 0 {
            return Err(NormsError::InvalidAge(age));
        }
        match MeasurementKey::from_code(code) {
            Ok(key) => self.resolve(key, age, gender),
            Err(_) => Ok(NormativeRange::empty()),
        }
    }
}
