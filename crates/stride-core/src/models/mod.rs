pub mod patient;
pub mod value;
pub mod visit;
