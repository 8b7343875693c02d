//! Appointment list query pipeline.
//!
//! A view is computed in three steps over the full appointment collection:
//!
//! 1. **Text filter**: keep an appointment if the query is empty, or if the lowercased query is
//!    a substring of the patient's lowercased `"first last"` or lowercased patient id.
//! 2. **Clinic filter**: keep an appointment if no clinic is selected, or if its clinic equals
//!    the selected clinic's display name.
//! 3. **Sort**: apply exactly one comparator from the [`SortKey`] catalog; the caller supplies
//!    the fallback used when no key is selected.
//!
//! The result borrows from the input, which is never reordered or mutated. Sorting is stable
//! and ties are left in filter order.
//!
//! The gender keys only move matching patients ahead of non-matching ones. Within each of the
//! two groups the input order is kept, so they are a partition rather than a total order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::{fmt, str::FromStr};

use crate::appointment::Appointment;
use crate::clinic::Clinic;
use crate::patient::Gender;
use crate::FrontDeskError;

/// One comparator from the closed sort catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    NameAsc,
    NameDesc,
    IdAsc,
    IdDesc,
    GenderMale,
    GenderFemale,
    GenderOther,
    AgeYoungest,
    AgeOldest,
    #[default]
    DateLatest,
    DateOldest,
    StatusAsc,
    StatusDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 13] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::IdAsc,
        SortKey::IdDesc,
        SortKey::GenderMale,
        SortKey::GenderFemale,
        SortKey::GenderOther,
        SortKey::AgeYoungest,
        SortKey::AgeOldest,
        SortKey::DateLatest,
        SortKey::DateOldest,
        SortKey::StatusAsc,
        SortKey::StatusDesc,
    ];

    pub fn value(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::IdAsc => "id-asc",
            SortKey::IdDesc => "id-desc",
            SortKey::GenderMale => "gender-male",
            SortKey::GenderFemale => "gender-female",
            SortKey::GenderOther => "gender-other",
            SortKey::AgeYoungest => "age-youngest",
            SortKey::AgeOldest => "age-oldest",
            SortKey::DateLatest => "date-latest",
            SortKey::DateOldest => "date-oldest",
            SortKey::StatusAsc => "status-asc",
            SortKey::StatusDesc => "status-desc",
        }
    }

    /// Menu label, e.g. `Patient name: A–Z`.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::NameAsc => "Patient name: A–Z",
            SortKey::NameDesc => "Patient name: Z–A",
            SortKey::IdAsc => "Patient ID: Ascending",
            SortKey::IdDesc => "Patient ID: Descending",
            SortKey::GenderMale => "Gender: Male",
            SortKey::GenderFemale => "Gender: Female",
            SortKey::GenderOther => "Gender: Other",
            SortKey::AgeYoungest => "Age: Youngest",
            SortKey::AgeOldest => "Age: Oldest",
            SortKey::DateLatest => "Time/Date: Latest",
            SortKey::DateOldest => "Time/Date: Oldest",
            SortKey::StatusAsc => "Status: A–Z",
            SortKey::StatusDesc => "Status: Z–A",
        }
    }

    /// Compare two appointments under this key.
    pub fn compare(self, a: &Appointment, b: &Appointment) -> Ordering {
        let name = |x: &Appointment| x.patient.full_name().to_lowercase();
        match self {
            SortKey::NameAsc => name(a).cmp(&name(b)),
            SortKey::NameDesc => name(b).cmp(&name(a)),
            SortKey::IdAsc => a.patient_id.cmp(&b.patient_id),
            SortKey::IdDesc => b.patient_id.cmp(&a.patient_id),
            SortKey::GenderMale => gender_first(Gender::Male, a, b),
            SortKey::GenderFemale => gender_first(Gender::Female, a, b),
            SortKey::GenderOther => gender_first(Gender::Other, a, b),
            SortKey::AgeYoungest => a.patient.age.cmp(&b.patient.age),
            SortKey::AgeOldest => b.patient.age.cmp(&a.patient.age),
            SortKey::DateLatest => b.date_time.cmp(&a.date_time),
            SortKey::DateOldest => a.date_time.cmp(&b.date_time),
            SortKey::StatusAsc => a.status.as_str().cmp(b.status.as_str()),
            SortKey::StatusDesc => b.status.as_str().cmp(a.status.as_str()),
        }
    }
}

fn gender_first(gender: Gender, a: &Appointment, b: &Appointment) -> Ordering {
    let rank = |x: &Appointment| u8::from(x.patient.gender != gender);
    rank(a).cmp(&rank(b))
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for SortKey {
    type Err = FrontDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.value() == s)
            .ok_or_else(|| FrontDeskError::InvalidInput(format!("unknown sort key '{s}'")))
    }
}

/// View parameters for the appointment list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppointmentQuery {
    /// Free-text search; empty means no text filter.
    pub text: String,
    pub clinic: Option<Clinic>,
    pub sort: Option<SortKey>,
}

impl AppointmentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn clinic(mut self, clinic: Clinic) -> Self {
        self.clinic = Some(clinic);
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    /// Run the pipeline, falling back to [`SortKey::DateLatest`] when no key is selected.
    pub fn apply<'a>(&self, appointments: &'a [Appointment]) -> Vec<&'a Appointment> {
        self.apply_with_default(appointments, SortKey::default())
    }

    /// Run the pipeline, falling back to `default_sort` when no key is selected.
    pub fn apply_with_default<'a>(
        &self,
        appointments: &'a [Appointment],
        default_sort: SortKey,
    ) -> Vec<&'a Appointment> {
        let mut view: Vec<&Appointment> = appointments
            .iter()
            .filter(|a| matches_text(a, &self.text))
            .filter(|a| matches_clinic(a, self.clinic))
            .collect();

        let key = self.sort.unwrap_or(default_sort);
        view.sort_by(|a, b| key.compare(a, b));

        tracing::debug!(
            "appointment query text={:?} clinic={:?} sort={} -> {} of {}",
            self.text,
            self.clinic,
            key,
            view.len(),
            appointments.len()
        );
        view
    }
}

/// Step 1 of the pipeline.
pub fn matches_text(appointment: &Appointment, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    appointment
        .patient
        .full_name()
        .to_lowercase()
        .contains(&query)
        || appointment
            .patient
            .id
            .as_str()
            .to_lowercase()
            .contains(&query)
}

/// Step 2 of the pipeline.
pub fn matches_clinic(appointment: &Appointment, clinic: Option<Clinic>) -> bool {
    clinic.map_or(true, |c| appointment.clinic == c.display_name())
}

/// One page of a computed view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// 0-based position of the first item on this page within the whole view.
    pub fn first_index(&self) -> usize {
        (self.page.max(1) - 1) * self.per_page
    }
}

/// Slice `items` into the 1-based `page` of `per_page` items.
///
/// Page 0 is treated as page 1. Pages past the end are empty. `per_page` of zero yields an
/// empty page.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = if per_page == 0 {
        0
    } else {
        total_items.div_ceil(per_page)
    };
    let start = (page - 1).saturating_mul(per_page).min(total_items);
    let end = start.saturating_add(per_page).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::{AppointmentStatus, AppointmentType};
    use crate::patient::Patient;
    use chrono::{NaiveDate, NaiveDateTime};
    use frontdesk_ids::{AppointmentId, PatientId};
    use frontdesk_types::{Naira, PersonName};

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[allow(clippy::too_many_arguments)]
    fn apt(
        id: &str,
        patient_id: &str,
        first: &str,
        last: &str,
        gender: Gender,
        age: u32,
        clinic: Clinic,
        when: NaiveDateTime,
        status: AppointmentStatus,
    ) -> Appointment {
        let patient = Patient {
            id: PatientId::parse(patient_id).unwrap(),
            first_name: PersonName::new(first).unwrap(),
            middle_name: None,
            last_name: PersonName::new(last).unwrap(),
            age,
            gender,
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            phone_number: None,
            profile_image: None,
        };
        Appointment {
            id: AppointmentId::parse(id).unwrap(),
            patient_id: patient.id.clone(),
            patient,
            clinic: clinic.display_name().to_string(),
            appointment_type: AppointmentType::WalkIn,
            wallet_balance: Naira::new(100_000),
            date_time: when,
            status,
            is_new: false,
        }
    }

    fn fixture() -> Vec<Appointment> {
        use AppointmentStatus::*;
        vec![
            apt("A1", "HOSP2938475", "Akpopodion", "Endurance", Gender::Male, 21, Clinic::Neurology, at(22, 11, 30), Processing),
            apt("A2", "HOSP8765432", "Boluwatife", "Olusola", Gender::Female, 30, Clinic::Accident, at(22, 17, 30), NotArrived),
            apt("A3", "HOSP7634892", "Arlie", "Mertz", Gender::Other, 23, Clinic::Neurology, at(22, 15, 45), AwaitingVitals),
            apt("A4", "HOSP9876543", "Akuchi", "Amadi", Gender::Female, 11, Clinic::Accident, at(22, 14, 0), SeenDoctor),
            apt("A5", "PLAT-S/0156234", "Chinedu", "Okafor", Gender::Male, 28, Clinic::Cardiology, at(21, 9, 0), AdmittedToWard),
        ]
    }

    fn ids(view: &[&Appointment]) -> Vec<String> {
        view.iter().map(|a| a.id.to_string()).collect()
    }

    #[test]
    fn test_empty_query_without_sort_defaults_to_latest_first() {
        let data = fixture();
        let view = AppointmentQuery::new().apply(&data);
        assert_eq!(ids(&view), vec!["A2", "A3", "A4", "A1", "A5"]);
    }

    #[test]
    fn test_empty_text_filter_keeps_everything_in_order() {
        let data = fixture();
        let kept: Vec<_> = data.iter().filter(|a| matches_text(a, "")).collect();
        assert_eq!(ids(&kept), vec!["A1", "A2", "A3", "A4", "A5"]);
    }

    #[test]
    fn test_text_filter_matches_name_or_id() {
        let data = fixture();
        for q in ["ak", "AK", "hosp98", "arlie m", "plat-s", "x"] {
            let view = AppointmentQuery::new().text(q).apply(&data);
            let needle = q.to_lowercase();
            for a in &view {
                assert!(
                    a.patient.full_name().to_lowercase().contains(&needle)
                        || a.patient.id.as_str().to_lowercase().contains(&needle),
                    "{} does not match {q}",
                    a.id
                );
            }
        }

        let view = AppointmentQuery::new().text("ak").sort(SortKey::IdAsc).apply(&data);
        assert_eq!(ids(&view), vec!["A1", "A4"]);
    }

    #[test]
    fn test_text_filter_does_not_match_across_name_and_id() {
        let data = fixture();
        // "first last - id" is only used by patient search, not by the list filter.
        assert!(AppointmentQuery::new().text("mertz - hosp").apply(&data).is_empty());
    }

    #[test]
    fn test_clinic_filter_uses_display_name_and_is_idempotent() {
        let data = fixture();
        let once: Vec<Appointment> = AppointmentQuery::new()
            .clinic(Clinic::Accident)
            .apply(&data)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once.len(), 2);
        assert!(once.iter().all(|a| a.clinic == "Accident & Emergency"));

        let twice = AppointmentQuery::new().clinic(Clinic::Accident).apply(&once);
        assert_eq!(ids(&twice), once.iter().map(|a| a.id.to_string()).collect::<Vec<_>>());

        assert!(AppointmentQuery::new().clinic(Clinic::Renal).apply(&data).is_empty());
    }

    #[test]
    fn test_date_latest_reversed_equals_date_oldest() {
        let data = fixture();
        let mut latest = AppointmentQuery::new().sort(SortKey::DateLatest).apply(&data);
        latest.reverse();
        let oldest = AppointmentQuery::new().sort(SortKey::DateOldest).apply(&data);
        assert_eq!(ids(&latest), ids(&oldest));
    }

    #[test]
    fn test_name_and_id_sorts() {
        let data = fixture();
        let by_name = AppointmentQuery::new().sort(SortKey::NameAsc).apply(&data);
        assert_eq!(ids(&by_name), vec!["A1", "A4", "A3", "A2", "A5"]);

        let by_name_desc = AppointmentQuery::new().sort(SortKey::NameDesc).apply(&data);
        assert_eq!(ids(&by_name_desc), vec!["A5", "A2", "A3", "A4", "A1"]);

        let by_id_desc = AppointmentQuery::new().sort(SortKey::IdDesc).apply(&data);
        assert_eq!(ids(&by_id_desc), vec!["A5", "A4", "A2", "A3", "A1"]);
    }

    #[test]
    fn test_gender_sort_is_a_stable_partition() {
        let data = fixture();
        let view = AppointmentQuery::new().sort(SortKey::GenderFemale).apply(&data);
        assert_eq!(ids(&view), vec!["A2", "A4", "A1", "A3", "A5"]);

        let view = AppointmentQuery::new().sort(SortKey::GenderOther).apply(&data);
        assert_eq!(ids(&view), vec!["A3", "A1", "A2", "A4", "A5"]);
    }

    #[test]
    fn test_age_and_status_sorts() {
        let data = fixture();
        let youngest = AppointmentQuery::new().sort(SortKey::AgeYoungest).apply(&data);
        assert_eq!(ids(&youngest), vec!["A4", "A1", "A3", "A5", "A2"]);

        let oldest = AppointmentQuery::new().sort(SortKey::AgeOldest).apply(&data);
        assert_eq!(ids(&oldest), vec!["A2", "A5", "A3", "A1", "A4"]);

        // Admitted to ward < Awaiting vitals < Not arrived < Processing < Seen doctor
        let status = AppointmentQuery::new().sort(SortKey::StatusAsc).apply(&data);
        assert_eq!(ids(&status), vec!["A5", "A3", "A2", "A1", "A4"]);
    }

    #[test]
    fn test_configured_default_sort_applies_only_without_key() {
        let data = fixture();
        let q = AppointmentQuery::new();
        assert_eq!(
            ids(&q.apply_with_default(&data, SortKey::DateOldest))[0],
            "A5"
        );
        let q = q.sort(SortKey::NameAsc);
        assert_eq!(ids(&q.apply_with_default(&data, SortKey::DateOldest))[0], "A1");
    }

    #[test]
    fn test_input_is_not_mutated() {
        let data = fixture();
        let before = data.clone();
        let _ = AppointmentQuery::new().sort(SortKey::NameDesc).apply(&data);
        assert_eq!(data, before);
    }

    #[test]
    fn test_sort_key_parse_and_labels() {
        for key in SortKey::ALL {
            assert_eq!(key.value().parse::<SortKey>().unwrap(), key);
        }
        assert_eq!(SortKey::AgeOldest.label(), "Age: Oldest");
        assert!("date".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=45).collect();

        let first = paginate(&items, 1, 20);
        assert_eq!(first.items.len(), 20);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.first_index(), 0);

        let last = paginate(&items, 3, 20);
        assert_eq!(last.items, vec![41, 42, 43, 44, 45]);
        assert_eq!(last.first_index(), 40);

        assert!(paginate(&items, 4, 20).items.is_empty());
        assert_eq!(paginate(&items, 0, 20).page, 1);
        assert_eq!(paginate(&items, 1, 0).total_pages, 0);
        assert_eq!(paginate::<u32>(&[], 1, 20).total_pages, 0);
    }
}
