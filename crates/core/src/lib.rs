//! # Front Desk Core
//!
//! Core business logic for the clinic front desk.
//!
//! This crate contains pure data operations over an in-memory session:
//! - Patient and appointment records held in a [`RecordStore`]
//! - The appointment list pipeline (text filter, clinic filter, sort, paginate)
//! - Intake and booking form validation, age derivation and identifier generation
//! - Seeding the store from the built-in fixtures or a YAML file
//!
//! **No presentation concerns**: rendering, argument parsing and reading the process environment
//! belong in the `frontdesk` binary.

pub mod appointment;
pub mod clinic;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod patient;
pub mod query;
pub mod seed;
pub mod service;
pub mod store;
pub mod validation;

pub use appointment::{Appointment, AppointmentStatus, AppointmentType, StatusBadge, Tone};
pub use clinic::Clinic;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    default_sort_from_env_value, page_size_from_env_value, seed_source_from_env_value,
    CoreConfig, SeedSource,
};
pub use error::{FrontDeskError, FrontDeskResult};
pub use format::{format_appointment_date_time, format_date, format_time, format_wallet};
pub use patient::{parse_date_of_birth, Gender, Patient};
pub use query::{paginate, AppointmentQuery, Page, SortKey};
pub use seed::{Seed, SeedSummary};
pub use service::FrontDesk;
pub use store::RecordStore;
pub use validation::{
    age_on, calculate_age, create_appointment, patient_from_form, validate_appointment_form,
    validate_patient_form, AppointmentField, AppointmentForm, PatientField, PatientForm,
    ValidationErrors,
};

pub use frontdesk_ids::{
    generate_appointment_id, generate_patient_id, AppointmentId, IdGenerator, PatientId,
};
pub use frontdesk_types::{NameError, Naira, PersonName};
