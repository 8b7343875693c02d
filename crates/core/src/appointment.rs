//! Appointment records and their closed vocabularies.

use chrono::{NaiveDateTime, Timelike};
use frontdesk_ids::{AppointmentId, PatientId};
use frontdesk_types::Naira;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{patient::Patient, FrontDeskError};

/// Kind of visit being booked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    WalkIn,
    Referral,
    Consult,
    FollowUp,
    MedicalExam,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 5] = [
        AppointmentType::WalkIn,
        AppointmentType::Referral,
        AppointmentType::Consult,
        AppointmentType::FollowUp,
        AppointmentType::MedicalExam,
    ];

    pub fn value(self) -> &'static str {
        match self {
            AppointmentType::WalkIn => "walk-in",
            AppointmentType::Referral => "referral",
            AppointmentType::Consult => "consult",
            AppointmentType::FollowUp => "follow-up",
            AppointmentType::MedicalExam => "medical-exam",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AppointmentType::WalkIn => "Walk-in",
            AppointmentType::Referral => "Referral",
            AppointmentType::Consult => "Consult",
            AppointmentType::FollowUp => "Follow-up",
            AppointmentType::MedicalExam => "For Medical Exam",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for AppointmentType {
    type Err = FrontDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentType::ALL
            .into_iter()
            .find(|t| t.value() == s)
            .ok_or_else(|| FrontDeskError::InvalidInput(format!("unknown appointment type '{s}'")))
    }
}

/// Where the patient is in today's visit.
///
/// New appointments start at [`AppointmentStatus::Processing`]. No transition rules exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Processing,
    #[serde(rename = "Not arrived")]
    NotArrived,
    #[serde(rename = "Awaiting vitals")]
    AwaitingVitals,
    #[serde(rename = "Awaiting doctor")]
    AwaitingDoctor,
    #[serde(rename = "Admitted to ward")]
    AdmittedToWard,
    #[serde(rename = "Transferred to A&E")]
    TransferredToAe,
    #[serde(rename = "Seen doctor")]
    SeenDoctor,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 7] = [
        AppointmentStatus::Processing,
        AppointmentStatus::NotArrived,
        AppointmentStatus::AwaitingVitals,
        AppointmentStatus::AwaitingDoctor,
        AppointmentStatus::AdmittedToWard,
        AppointmentStatus::TransferredToAe,
        AppointmentStatus::SeenDoctor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Processing => "Processing",
            AppointmentStatus::NotArrived => "Not arrived",
            AppointmentStatus::AwaitingVitals => "Awaiting vitals",
            AppointmentStatus::AwaitingDoctor => "Awaiting doctor",
            AppointmentStatus::AdmittedToWard => "Admitted to ward",
            AppointmentStatus::TransferredToAe => "Transferred to A&E",
            AppointmentStatus::SeenDoctor => "Seen doctor",
        }
    }

    /// Colour and icon of the status badge in the appointment list.
    pub fn badge(self) -> StatusBadge {
        let (tone, icon) = match self {
            AppointmentStatus::Processing => (Tone::Orange, "double-caret-right-circle"),
            AppointmentStatus::NotArrived => (Tone::Red, "minus-circle"),
            AppointmentStatus::AwaitingVitals => (Tone::Purple, "heart-circle"),
            AppointmentStatus::AwaitingDoctor => (Tone::Blue, "heart"),
            AppointmentStatus::AdmittedToWard => (Tone::Orange, "health"),
            AppointmentStatus::TransferredToAe => (Tone::Purple, "health-plus"),
            AppointmentStatus::SeenDoctor => (Tone::Green, "tick"),
        };
        StatusBadge { tone, icon }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = FrontDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| FrontDeskError::InvalidInput(format!("unknown status '{s}'")))
    }
}

/// Badge colour family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Orange,
    Red,
    Purple,
    Blue,
    Green,
}

/// Presentation of a status in the appointment list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub tone: Tone,
    pub icon: &'static str,
}

/// A booked appointment.
///
/// `patient` is a copy of the patient record taken at booking time; the store checks that it
/// agrees with `patient_id` on insert and never re-syncs it afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub patient: Patient,
    /// Clinic display name, e.g. `Accident & Emergency`.
    pub clinic: String,
    pub appointment_type: AppointmentType,
    pub wallet_balance: Naira,
    #[serde(with = "minute_precision")]
    pub date_time: NaiveDateTime,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub is_new: bool,
}

/// `date_time` with seconds and sub-second parts dropped, the precision appointments are
/// stored at.
pub fn truncate_to_minute(date_time: NaiveDateTime) -> NaiveDateTime {
    date_time
        .with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(date_time)
}

/// Serde adapter for `YYYY-MM-DDTHH:MM` date-times.
pub(crate) mod minute_precision {
    use crate::constants::APPOINTMENT_DATE_TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(APPOINTMENT_DATE_TIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, APPOINTMENT_DATE_TIME_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}
