//! Form validation for patient intake and appointment booking.
//!
//! Validators never fail: they return a [`ValidationErrors`] map from field to human-readable
//! message, and an empty map means the form may be submitted. Builders such as
//! [`create_appointment`] assume a validated form but still refuse incomplete input with a
//! typed error rather than panicking.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use frontdesk_ids::{IdGenerator, PatientId};
use frontdesk_types::{Naira, PersonName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::appointment::{
    truncate_to_minute, Appointment, AppointmentStatus, AppointmentType,
};
use crate::clinic::Clinic;
use crate::constants::{MIN_NAME_CHARS, MIN_PHONE_CHARS};
use crate::patient::{parse_date_of_birth, Gender, Patient};
use crate::{FrontDeskError, FrontDeskResult};

/// Field -> message map produced by a validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord> Default for ValidationErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> ValidationErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    /// Fields with an error, in declaration order.
    pub fn fields(&self) -> Vec<F> {
        self.errors.keys().copied().collect()
    }

    /// Drop the error for `field`, typically once the user edits it.
    pub fn clear_field(&mut self, field: F) -> Option<String> {
        self.errors.remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl<F: Ord + fmt::Display> fmt::Display for ValidationErrors<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Fields of the patient intake form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PatientField {
    FirstName,
    LastName,
    DateOfBirth,
    Gender,
    PhoneNumber,
}

impl PatientField {
    pub fn as_str(self) -> &'static str {
        match self {
            PatientField::FirstName => "firstName",
            PatientField::LastName => "lastName",
            PatientField::DateOfBirth => "dateOfBirth",
            PatientField::Gender => "gender",
            PatientField::PhoneNumber => "phoneNumber",
        }
    }
}

impl fmt::Display for PatientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields of the appointment booking form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AppointmentField {
    Patient,
    Clinic,
    AppointmentType,
    Date,
}

impl AppointmentField {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentField::Patient => "patient",
            AppointmentField::Clinic => "clinic",
            AppointmentField::AppointmentType => "appointmentType",
            AppointmentField::Date => "date",
        }
    }
}

impl fmt::Display for AppointmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw patient intake form, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientForm {
    /// Leave blank to have an identifier allocated.
    pub patient_id: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub title: String,
    /// `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub gender: String,
    pub phone_number: String,
    pub is_new_to_hospital: bool,
}

/// Appointment booking form. Unselected fields are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppointmentForm {
    pub patient: Option<Patient>,
    pub clinic: Option<Clinic>,
    pub appointment_type: Option<AppointmentType>,
    pub date: Option<NaiveDateTime>,
}

fn check_name(
    errors: &mut ValidationErrors<PatientField>,
    field: PatientField,
    label: &str,
    value: &str,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field, format!("{label} is required"));
    } else if trimmed.chars().count() < MIN_NAME_CHARS {
        errors.insert(
            field,
            format!("{label} must be at least {MIN_NAME_CHARS} characters"),
        );
    }
}

/// Validate a patient intake form against `today`.
///
/// Date of birth is compared as a calendar date, so a patient born today is accepted.
pub fn validate_patient_form(form: &PatientForm, today: NaiveDate) -> ValidationErrors<PatientField> {
    let mut errors = ValidationErrors::new();

    check_name(&mut errors, PatientField::FirstName, "First name", &form.first_name);
    check_name(&mut errors, PatientField::LastName, "Last name", &form.last_name);

    if form.date_of_birth.trim().is_empty() {
        errors.insert(PatientField::DateOfBirth, "Date of birth is required");
    } else {
        match parse_date_of_birth(&form.date_of_birth) {
            Ok(dob) if dob > today => {
                errors.insert(
                    PatientField::DateOfBirth,
                    "Date of birth cannot be in the future",
                );
            }
            Ok(_) => {}
            Err(_) => {
                errors.insert(
                    PatientField::DateOfBirth,
                    "Date of birth must be a valid date (YYYY-MM-DD)",
                );
            }
        }
    }

    if form.gender.trim().is_empty() {
        errors.insert(PatientField::Gender, "Gender is required");
    } else if form.gender.parse::<Gender>().is_err() {
        errors.insert(PatientField::Gender, "Gender must be Male, Female or Other");
    }

    let phone = form.phone_number.trim();
    if phone.is_empty() {
        errors.insert(PatientField::PhoneNumber, "Phone number is required");
    } else if phone.chars().count() < MIN_PHONE_CHARS {
        errors.insert(
            PatientField::PhoneNumber,
            format!("Phone number must be at least {MIN_PHONE_CHARS} digits"),
        );
    }

    errors
}

/// Validate an appointment booking form against `now`.
///
/// The selected date-time, at the minute precision it will be stored with, must be strictly
/// later than `now`.
pub fn validate_appointment_form(
    form: &AppointmentForm,
    now: NaiveDateTime,
) -> ValidationErrors<AppointmentField> {
    let mut errors = ValidationErrors::new();

    if form.patient.is_none() {
        errors.insert(AppointmentField::Patient, "Please select or create a patient");
    }
    if form.clinic.is_none() {
        errors.insert(AppointmentField::Clinic, "Please select a clinic");
    }
    if form.appointment_type.is_none() {
        errors.insert(
            AppointmentField::AppointmentType,
            "Please select an appointment type",
        );
    }
    match form.date {
        None => errors.insert(AppointmentField::Date, "Please select a date and time"),
        Some(date) if truncate_to_minute(date) <= now => errors.insert(
            AppointmentField::Date,
            "Appointment date and time must be in the future",
        ),
        Some(_) => {}
    }

    errors
}

/// Whole years between `date_of_birth` and `today`.
///
/// A year only counts once the birthday (month and day) has been reached. Dates of birth in
/// the future yield zero.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// [`age_on`] for a `YYYY-MM-DD` string.
///
/// # Errors
///
/// Returns [`FrontDeskError::InvalidDate`] if `date_of_birth` does not parse.
pub fn calculate_age(date_of_birth: &str, today: NaiveDate) -> FrontDeskResult<u32> {
    Ok(age_on(parse_date_of_birth(date_of_birth)?, today))
}

/// Build a [`Patient`] from a validated intake form.
///
/// A blank `patient_id` is replaced with a freshly allocated `PLAT-S/` identifier. `title` and
/// `is_new_to_hospital` are intake-only and not kept on the record.
///
/// # Errors
///
/// Returns a `FrontDeskError` if a name is blank, the date of birth or gender does not parse,
/// or a supplied identifier is blank.
pub fn patient_from_form(
    form: &PatientForm,
    today: NaiveDate,
    ids: &mut IdGenerator,
) -> FrontDeskResult<Patient> {
    let id = if form.patient_id.trim().is_empty() {
        ids.patient_id()
    } else {
        PatientId::parse(&form.patient_id)?
    };
    let date_of_birth = parse_date_of_birth(&form.date_of_birth)?;
    let optional = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    Ok(Patient {
        id,
        first_name: PersonName::new(&form.first_name)?,
        middle_name: optional(&form.middle_name),
        last_name: PersonName::new(&form.last_name)?,
        age: age_on(date_of_birth, today),
        gender: form.gender.parse()?,
        date_of_birth,
        phone_number: optional(&form.phone_number),
        profile_image: None,
    })
}

/// Build a new appointment from a validated booking form.
///
/// The appointment gets a generated `APT-` identifier, the clinic's display name, status
/// `Processing`, a zero wallet balance and `is_new = true`. Seconds are dropped from the
/// selected date-time.
///
/// # Errors
///
/// Returns [`FrontDeskError::IncompleteAppointment`] naming the first missing field.
pub fn create_appointment(
    form: &AppointmentForm,
    ids: &mut IdGenerator,
) -> FrontDeskResult<Appointment> {
    let patient = form
        .patient
        .clone()
        .ok_or(FrontDeskError::IncompleteAppointment(AppointmentField::Patient))?;
    let clinic = form
        .clinic
        .ok_or(FrontDeskError::IncompleteAppointment(AppointmentField::Clinic))?;
    let appointment_type = form.appointment_type.ok_or(
        FrontDeskError::IncompleteAppointment(AppointmentField::AppointmentType),
    )?;
    let date = form
        .date
        .ok_or(FrontDeskError::IncompleteAppointment(AppointmentField::Date))?;
    let date_time = truncate_to_minute(date);

    Ok(Appointment {
        id: ids.appointment_id(),
        patient_id: patient.id.clone(),
        patient,
        clinic: clinic.display_name().to_string(),
        appointment_type,
        wallet_balance: Naira::ZERO,
        date_time,
        status: AppointmentStatus::Processing,
        is_new: true,
    })
}
