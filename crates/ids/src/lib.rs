//! Record identifier utilities.
//!
//! Front desk records are keyed by short, human-readable string identifiers rather than UUIDs:
//!
//! - Patients: `PLAT-S/` followed by a zero-padded 7-digit number, e.g. `PLAT-S/0012345`.
//! - Appointments: `APT-` followed by a zero-padded 7-digit number, e.g. `APT-0456789`.
//!
//! Records loaded from fixtures may carry identifiers in other shapes (`HOSP2938475`, `APT001`),
//! so parsing only requires a non-blank value. [`PatientId::is_generated`] and
//! [`AppointmentId::is_generated`] check the generated shape specifically.
//!
//! ## Uniqueness
//! Generated suffixes are drawn at random from a bounded range and are **not** checked against
//! existing records. Collisions are possible; the record store treats a colliding insert as a
//! duplicate and ignores it.

mod service;

pub use service::{
    generate_appointment_id, generate_patient_id, AppointmentId, IdGenerator, PatientId,
};

/// Prefix for generated patient identifiers.
pub const PATIENT_ID_PREFIX: &str = "PLAT-S/";

/// Prefix for generated appointment identifiers.
pub const APPOINTMENT_ID_PREFIX: &str = "APT-";

/// Number of digits in a generated identifier suffix.
pub const ID_SUFFIX_WIDTH: usize = 7;

/// Exclusive upper bound for generated patient suffixes.
pub const PATIENT_SUFFIX_BOUND: u32 = 1_000_000;

/// Exclusive upper bound for generated appointment suffixes.
pub const APPOINTMENT_SUFFIX_BOUND: u32 = 10_000_000;

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
