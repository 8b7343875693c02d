use crate::validation::{AppointmentField, PatientField, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum FrontDeskError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid name: {0}")]
    Name(#[from] frontdesk_types::NameError),
    #[error("invalid identifier: {0}")]
    Id(#[from] frontdesk_ids::IdError),
    #[error("invalid date {value:?}: expected {expected}")]
    InvalidDate {
        value: String,
        expected: &'static str,
    },

    #[error("patient form rejected: {0}")]
    PatientRejected(ValidationErrors<PatientField>),
    #[error("appointment form rejected: {0}")]
    AppointmentRejected(ValidationErrors<AppointmentField>),
    #[error("appointment is missing required field: {0}")]
    IncompleteAppointment(AppointmentField),

    #[error("a record with id {0} already exists")]
    DuplicateId(String),
    #[error("appointment {appointment_id} references unknown patient {patient_id}")]
    UnknownPatient {
        appointment_id: String,
        patient_id: String,
    },
    #[error(
        "appointment {appointment_id} embeds patient {embedded_id}, which does not match stored patient {patient_id}"
    )]
    PatientMismatch {
        appointment_id: String,
        patient_id: String,
        embedded_id: String,
    },

    #[error("patient {patient_id} has a date of birth in the future: {date_of_birth}")]
    FutureDateOfBirth {
        patient_id: String,
        date_of_birth: String,
    },

    #[error("failed to read seed file: {0}")]
    FileRead(std::io::Error),
    #[error("seed file schema mismatch at {path}: {message}")]
    SeedSchema { path: String, message: String },
}

pub type FrontDeskResult<T> = std::result::Result<T, FrontDeskError>;
