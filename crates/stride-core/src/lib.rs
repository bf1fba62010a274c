//! stride-core
//!
//! Pure domain types for the Stride outcomes tracker: patients, visits,
//! measurement values, and the Not-Tested sentinel. No storage dependency —
//! this is the shared vocabulary of the Stride system.

pub mod error;
pub mod models;
