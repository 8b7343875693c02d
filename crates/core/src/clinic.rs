//! The clinic catalog.
//!
//! Appointments store the clinic's display name as plain text; the enum value is what the
//! booking form and the list filter select. The two are linked through [`Clinic::display_name`].

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::FrontDeskError;

/// A hospital department an appointment can be booked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clinic {
    Accident,
    Neurology,
    Cardiology,
    Gastroenterology,
    Renal,
}

impl Clinic {
    /// Every clinic, in picker order.
    pub const ALL: [Clinic; 5] = [
        Clinic::Accident,
        Clinic::Neurology,
        Clinic::Cardiology,
        Clinic::Gastroenterology,
        Clinic::Renal,
    ];

    /// Form/filter value, e.g. `accident`.
    pub fn value(self) -> &'static str {
        match self {
            Clinic::Accident => "accident",
            Clinic::Neurology => "neurology",
            Clinic::Cardiology => "cardiology",
            Clinic::Gastroenterology => "gastroenterology",
            Clinic::Renal => "renal",
        }
    }

    /// Name stored on appointments and matched by the clinic filter.
    pub fn display_name(self) -> &'static str {
        match self {
            Clinic::Accident => "Accident & Emergency",
            Clinic::Neurology => "Neurology",
            Clinic::Cardiology => "Cardiology",
            Clinic::Gastroenterology => "Gastroenterology",
            Clinic::Renal => "Renal",
        }
    }

    /// Label shown in the clinic picker.
    pub fn label(self) -> &'static str {
        match self {
            Clinic::Accident => "Accident and Emergency",
            Clinic::Neurology => "Neurology",
            Clinic::Cardiology => "Cardiology",
            Clinic::Gastroenterology => "Gastroenterology",
            Clinic::Renal => "Renal",
        }
    }

    pub fn from_display_name(name: &str) -> Option<Clinic> {
        Clinic::ALL.into_iter().find(|c| c.display_name() == name)
    }

    /// Picker search: clinics whose label contains `query`, case-insensitively.
    pub fn search(query: &str) -> Vec<Clinic> {
        let query = query.to_lowercase();
        Clinic::ALL
            .into_iter()
            .filter(|c| c.label().to_lowercase().contains(&query))
            .collect()
    }
}

impl fmt::Display for Clinic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for Clinic {
    type Err = FrontDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Clinic::ALL
            .into_iter()
            .find(|c| c.value() == s)
            .ok_or_else(|| FrontDeskError::InvalidInput(format!("unknown clinic '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_round_trips_through_lookup() {
        for clinic in Clinic::ALL {
            assert_eq!(Clinic::from_display_name(clinic.display_name()), Some(clinic));
            assert_eq!(clinic.value().parse::<Clinic>().unwrap(), clinic);
        }
        assert_eq!(Clinic::from_display_name("Ear, Nose & Throat"), None);
    }

    #[test]
    fn test_accident_names() {
        assert_eq!(Clinic::Accident.display_name(), "Accident & Emergency");
        assert_eq!(Clinic::Accident.label(), "Accident and Emergency");
    }

    #[test]
    fn test_search_matches_labels_case_insensitively() {
        assert_eq!(Clinic::search("EMERG"), vec![Clinic::Accident]);
        assert_eq!(Clinic::search("ology").len(), 3);
        assert_eq!(Clinic::search(""), Clinic::ALL.to_vec());
        assert!(Clinic::search("dental").is_empty());
    }

    #[test]
    fn test_unknown_clinic_value() {
        assert!("Neurology".parse::<Clinic>().is_err());
    }
}
