//! Internal implementation of the record identifier types.
//!
//! This module contains the identifier newtypes and the random generator used when the front
//! desk allocates identifiers for newly registered patients and booked appointments.

use crate::{
    IdError, IdResult, APPOINTMENT_ID_PREFIX, APPOINTMENT_SUFFIX_BOUND, ID_SUFFIX_WIDTH,
    PATIENT_ID_PREFIX, PATIENT_SUFFIX_BOUND,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::{fmt, str::FromStr};

fn non_blank(kind: &str, input: &str) -> IdResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IdError::InvalidInput(format!("{kind} cannot be empty")));
    }
    Ok(trimmed.to_owned())
}

fn has_generated_shape(input: &str, prefix: &str) -> bool {
    input.strip_prefix(prefix).is_some_and(|suffix| {
        suffix.len() == ID_SUFFIX_WIDTH && suffix.bytes().all(|b| b.is_ascii_digit())
    })
}

/// Identifier of a patient record.
///
/// Once constructed the value is guaranteed to be non-blank and trimmed. Matching against
/// other identifiers is exact (case-sensitive); case-insensitive matching is a search concern
/// handled by the record store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct PatientId(String);

impl PatientId {
    /// Validates and wraps a patient identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `input` is empty or whitespace only.
    pub fn parse(input: &str) -> IdResult<Self> {
        non_blank("patient id", input).map(Self)
    }

    /// Returns true if `input` has the generated `PLAT-S/NNNNNNN` shape.
    pub fn is_generated(input: &str) -> bool {
        has_generated_shape(input, PATIENT_ID_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PatientId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatientId::parse(s)
    }
}

impl TryFrom<String> for PatientId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PatientId::parse(&value)
    }
}

impl From<PatientId> for String {
    fn from(id: PatientId) -> Self {
        id.0
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of an appointment record.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct AppointmentId(String);

impl AppointmentId {
    /// Validates and wraps an appointment identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `input` is empty or whitespace only.
    pub fn parse(input: &str) -> IdResult<Self> {
        non_blank("appointment id", input).map(Self)
    }

    /// Returns true if `input` has the generated `APT-NNNNNNN` shape.
    pub fn is_generated(input: &str) -> bool {
        has_generated_shape(input, APPOINTMENT_ID_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AppointmentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentId::parse(s)
    }
}

impl TryFrom<String> for AppointmentId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AppointmentId::parse(&value)
    }
}

impl From<AppointmentId> for String {
    fn from(id: AppointmentId) -> Self {
        id.0
    }
}

impl AsRef<str> for AppointmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Random identifier allocator.
///
/// [`IdGenerator::new`] seeds from OS entropy; [`IdGenerator::from_seed`] gives a reproducible
/// sequence for tests and fixtures.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: StdRng,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Allocates a `PLAT-S/NNNNNNN` identifier.
    ///
    /// The suffix is drawn from `0..1_000_000`, so the leading digit is always zero.
    pub fn patient_id(&mut self) -> PatientId {
        let n = self.rng.gen_range(0..PATIENT_SUFFIX_BOUND);
        PatientId(format!(
            "{PATIENT_ID_PREFIX}{n:0width$}",
            width = ID_SUFFIX_WIDTH
        ))
    }

    /// Allocates an `APT-NNNNNNN` identifier.
    pub fn appointment_id(&mut self) -> AppointmentId {
        let n = self.rng.gen_range(0..APPOINTMENT_SUFFIX_BOUND);
        AppointmentId(format!(
            "{APPOINTMENT_ID_PREFIX}{n:0width$}",
            width = ID_SUFFIX_WIDTH
        ))
    }
}

/// Allocates a patient identifier from a freshly seeded generator.
pub fn generate_patient_id() -> PatientId {
    IdGenerator::new().patient_id()
}

/// Allocates an appointment identifier from a freshly seeded generator.
pub fn generate_appointment_id() -> AppointmentId {
    IdGenerator::new().appointment_id()
}
