use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormsError {
    /// Age supplied to the resolver or scorer was negative. Ages are whole
    /// years derived from the date of birth at evaluation time.
    #[error("invalid age: {0}")]
    InvalidAge(i16),

    /// Direct catalog lookup of a code the catalog does not define. The
    /// resolver's string entry point is tolerant instead and yields an
    /// empty range for unknown codes.
    #[error("unknown measurement: {0}")]
    UnknownMeasurement(String),
}
