//! Seed data for the record store.
//!
//! Seeds are YAML documents with two lists:
//!
//! ```yaml
//! patients:
//!   - id: HOSP2938475
//!     first_name: Akpopodion
//!     last_name: Endurance
//!     gender: Male
//!     date_of_birth: 2004-01-15
//! appointments:
//!   - id: APT001
//!     patient_id: HOSP2938475
//!     clinic: Neurology
//!     appointment_type: walk-in
//!     wallet_balance: 120000
//!     date_time: 2025-09-22T11:30
//!     status: Processing
//! ```
//!
//! Patient ages are not stored; they are derived from `date_of_birth` when the seed is applied.
//! Appointments name their patient by id and receive the embedded patient copy from the store,
//! so every appointment's patient must appear earlier in the same seed or already be stored.

use chrono::{NaiveDate, NaiveDateTime};
use frontdesk_ids::{AppointmentId, PatientId};
use frontdesk_types::{Naira, PersonName};
use serde::Deserialize;
use std::path::Path;

use crate::appointment::{minute_precision, Appointment, AppointmentStatus, AppointmentType};
use crate::config::SeedSource;
use crate::patient::{Gender, Patient};
use crate::store::RecordStore;
use crate::validation::age_on;
use crate::{FrontDeskError, FrontDeskResult};

const BUILTIN_SEED: &str = include_str!("../fixtures/builtin.yaml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedWire {
    #[serde(default)]
    patients: Vec<PatientWire>,
    #[serde(default)]
    appointments: Vec<AppointmentWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatientWire {
    id: PatientId,
    first_name: PersonName,
    #[serde(default)]
    middle_name: Option<String>,
    last_name: PersonName,
    gender: Gender,
    date_of_birth: NaiveDate,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    profile_image: Option<String>,
}

fn processing() -> AppointmentStatus {
    AppointmentStatus::Processing
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AppointmentWire {
    id: AppointmentId,
    patient_id: PatientId,
    clinic: String,
    appointment_type: AppointmentType,
    #[serde(default)]
    wallet_balance: Naira,
    #[serde(with = "minute_precision")]
    date_time: NaiveDateTime,
    #[serde(default = "processing")]
    status: AppointmentStatus,
    #[serde(default)]
    is_new: bool,
}

/// A parsed seed document, ready to be applied to a store.
#[derive(Debug)]
pub struct Seed {
    patients: Vec<PatientWire>,
    appointments: Vec<AppointmentWire>,
}

/// Counts of records inserted by [`Seed::apply`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub patients: usize,
    pub appointments: usize,
}

impl Seed {
    /// Parse a seed document from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`FrontDeskError::SeedSchema`] with the path of the failing field (for example
    /// `appointments[2].date_time`) when the YAML does not match the seed schema.
    pub fn parse(yaml_text: &str) -> FrontDeskResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, SeedWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                return Err(FrontDeskError::SeedSchema {
                    path,
                    message: source.to_string(),
                });
            }
        };

        Ok(Self {
            patients: wire.patients,
            appointments: wire.appointments,
        })
    }

    /// The demo records shipped with the crate.
    pub fn builtin() -> FrontDeskResult<Self> {
        Self::parse(BUILTIN_SEED)
    }

    /// Read and parse a seed file.
    pub fn from_file(path: &Path) -> FrontDeskResult<Self> {
        let text = std::fs::read_to_string(path).map_err(FrontDeskError::FileRead)?;
        Self::parse(&text)
    }

    /// Resolve the configured seed source. [`SeedSource::Empty`] yields an empty seed.
    pub fn from_source(source: &SeedSource) -> FrontDeskResult<Self> {
        match source {
            SeedSource::Builtin => Self::builtin(),
            SeedSource::Empty => Ok(Self {
                patients: Vec::new(),
                appointments: Vec::new(),
            }),
            SeedSource::File(path) => Self::from_file(path),
        }
    }

    /// Insert the seed's records into `store`, deriving ages against `today`.
    ///
    /// Records whose id is already present are skipped and not counted.
    ///
    /// # Errors
    ///
    /// Returns [`FrontDeskError::FutureDateOfBirth`] if a patient is born after `today`, or
    /// [`FrontDeskError::UnknownPatient`] if an appointment names a patient that is neither in
    /// the seed nor already in the store. Records inserted before the failure stay.
    pub fn apply(self, store: &mut RecordStore, today: NaiveDate) -> FrontDeskResult<SeedSummary> {
        let mut summary = SeedSummary::default();

        for p in self.patients {
            if p.date_of_birth > today {
                tracing::warn!("seed patient {} is born after {}", p.id, today);
                return Err(FrontDeskError::FutureDateOfBirth {
                    patient_id: p.id.to_string(),
                    date_of_birth: p.date_of_birth.to_string(),
                });
            }
            let patient = Patient {
                age: age_on(p.date_of_birth, today),
                id: p.id,
                first_name: p.first_name,
                middle_name: p.middle_name,
                last_name: p.last_name,
                gender: p.gender,
                date_of_birth: p.date_of_birth,
                phone_number: p.phone_number,
                profile_image: p.profile_image,
            };
            if store.add_patient(patient) {
                summary.patients += 1;
            }
        }

        for a in self.appointments {
            let patient = store.get_patient(&a.patient_id).cloned().ok_or_else(|| {
                FrontDeskError::UnknownPatient {
                    appointment_id: a.id.to_string(),
                    patient_id: a.patient_id.to_string(),
                }
            })?;
            let appointment = Appointment {
                id: a.id,
                patient_id: a.patient_id,
                patient,
                clinic: a.clinic,
                appointment_type: a.appointment_type,
                wallet_balance: a.wallet_balance,
                date_time: a.date_time,
                status: a.status,
                is_new: a.is_new,
            };
            if store.add_appointment(appointment)? {
                summary.appointments += 1;
            }
        }

        tracing::info!(
            "seeded {} patients and {} appointments",
            summary.patients,
            summary.appointments
        );
        Ok(summary)
    }
}
