//! Patient records.

use chrono::NaiveDate;
use frontdesk_ids::PatientId;
use frontdesk_types::PersonName;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{FrontDeskError, FrontDeskResult};

/// Patient gender as captured on the intake form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = FrontDeskError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                FrontDeskError::InvalidInput(format!(
                    "unknown gender '{s}' (expected Male, Female or Other)"
                ))
            })
    }
}

/// A registered patient.
///
/// Patients are immutable once created. `age` is derived from `date_of_birth` at the moment the
/// record is built and is not refreshed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub first_name: PersonName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: PersonName,
    pub age: u32,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl Patient {
    /// `"First Last"`, the form used for name search and name sorting.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// `"First Last - ID"`, the form shown in the patient picker.
    pub fn picker_label(&self) -> String {
        format!("{} {} - {}", self.first_name, self.last_name, self.id)
    }
}

/// Parse a `YYYY-MM-DD` date of birth.
pub fn parse_date_of_birth(value: &str) -> FrontDeskResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), crate::constants::DATE_OF_BIRTH_FORMAT).map_err(|_| {
        FrontDeskError::InvalidDate {
            value: value.to_string(),
            expected: "YYYY-MM-DD",
        }
    })
}
