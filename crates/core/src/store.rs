//! In-memory record store.
//!
//! The store owns the session's patients and appointments in insertion order. It is a plain
//! value: callers hold it directly (or inside [`crate::FrontDesk`]) and pass it by reference.
//! Nothing here is persisted.

use frontdesk_ids::{AppointmentId, PatientId};

use crate::appointment::Appointment;
use crate::patient::Patient;
use crate::{FrontDeskError, FrontDeskResult};

#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Insert `patient` unless one with the same id already exists.
    ///
    /// Returns `true` if the patient was inserted. No form validation happens here.
    pub fn add_patient(&mut self, patient: Patient) -> bool {
        if self.get_patient(&patient.id).is_some() {
            tracing::debug!("patient {} already present; ignoring", patient.id);
            return false;
        }
        self.patients.push(patient);
        true
    }

    pub fn get_patient(&self, id: &PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| &p.id == id)
    }

    /// Patients matching `query`, in store order.
    ///
    /// Matching is a case-insensitive substring test against `"first last"`, the id, and
    /// `"first last - id"`. A blank query returns every patient.
    pub fn search_patients(&self, query: &str) -> Vec<&Patient> {
        if query.trim().is_empty() {
            return self.patients.iter().collect();
        }

        let query = query.to_lowercase();
        self.patients
            .iter()
            .filter(|p| {
                p.full_name().to_lowercase().contains(&query)
                    || p.id.as_str().to_lowercase().contains(&query)
                    || p.picker_label().to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Insert `appointment` unless one with the same id already exists.
    ///
    /// Returns `Ok(true)` if inserted and `Ok(false)` for a duplicate id.
    ///
    /// # Errors
    ///
    /// Returns [`FrontDeskError::UnknownPatient`] if `patient_id` is not in the store, or
    /// [`FrontDeskError::PatientMismatch`] if the embedded patient is not identical to the stored
    /// record for `patient_id`.
    pub fn add_appointment(&mut self, appointment: Appointment) -> FrontDeskResult<bool> {
        if self.get_appointment(&appointment.id).is_some() {
            tracing::debug!("appointment {} already present; ignoring", appointment.id);
            return Ok(false);
        }

        if appointment.patient.id != appointment.patient_id {
            tracing::warn!("appointment {} embeds the wrong patient", appointment.id);
            return Err(FrontDeskError::PatientMismatch {
                appointment_id: appointment.id.to_string(),
                patient_id: appointment.patient_id.to_string(),
                embedded_id: appointment.patient.id.to_string(),
            });
        }

        let Some(stored) = self.get_patient(&appointment.patient_id) else {
            tracing::warn!(
                "appointment {} references unknown patient {}",
                appointment.id,
                appointment.patient_id
            );
            return Err(FrontDeskError::UnknownPatient {
                appointment_id: appointment.id.to_string(),
                patient_id: appointment.patient_id.to_string(),
            });
        };

        if *stored != appointment.patient {
            tracing::warn!(
                "appointment {} embeds a copy of patient {} that differs from the stored record",
                appointment.id,
                appointment.patient_id
            );
            return Err(FrontDeskError::PatientMismatch {
                appointment_id: appointment.id.to_string(),
                patient_id: appointment.patient_id.to_string(),
                embedded_id: appointment.patient.id.to_string(),
            });
        }

        self.appointments.push(appointment);
        Ok(true)
    }

    pub fn get_appointment(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| &a.id == id)
    }

    /// Appointments booked for `patient_id`, in insertion order.
    pub fn patient_appointments(&self, patient_id: &PatientId) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| &a.patient_id == patient_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::{AppointmentStatus, AppointmentType};
    use crate::patient::Gender;
    use chrono::NaiveDate;
    use frontdesk_types::{Naira, PersonName};

    fn patient(id: &str, first: &str, last: &str) -> Patient {
        Patient {
            id: PatientId::parse(id).unwrap(),
            first_name: PersonName::new(first).unwrap(),
            middle_name: None,
            last_name: PersonName::new(last).unwrap(),
            age: 30,
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1995, 6, 22).unwrap(),
            phone_number: None,
            profile_image: None,
        }
    }

    fn appointment(id: &str, patient: &Patient) -> Appointment {
        Appointment {
            id: AppointmentId::parse(id).unwrap(),
            patient_id: patient.id.clone(),
            patient: patient.clone(),
            clinic: "Neurology".into(),
            appointment_type: AppointmentType::Referral,
            wallet_balance: Naira::new(90_000),
            date_time: NaiveDate::from_ymd_opt(2025, 9, 22)
                .unwrap()
                .and_hms_opt(15, 45, 0)
                .unwrap(),
            status: AppointmentStatus::AwaitingVitals,
            is_new: false,
        }
    }

    fn store() -> RecordStore {
        let mut store = RecordStore::new();
        store.add_patient(patient("HOSP8765432", "Boluwatife", "Olusola"));
        store.add_patient(patient("HOSP7634892", "Arlie", "Mertz"));
        store.add_patient(patient("PLAT-S/0124789", "Aikpopoidon", "Feranmi"));
        store
    }

    fn pid(id: &str) -> PatientId {
        PatientId::parse(id).unwrap()
    }

    #[test]
    fn test_add_patient_ignores_duplicate_id() {
        let mut store = store();
        assert!(!store.add_patient(patient("HOSP7634892", "Someone", "Else")));
        assert_eq!(store.patients().len(), 3);
        assert_eq!(
            store.get_patient(&pid("HOSP7634892")).unwrap().first_name.as_str(),
            "Arlie"
        );
    }

    #[test]
    fn test_get_patient_missing_is_none() {
        assert!(store().get_patient(&pid("HOSP0000000")).is_none());
    }

    #[test]
    fn test_search_patients_blank_returns_all_in_order() {
        let store = store();
        let ids: Vec<_> = store
            .search_patients("   ")
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["HOSP8765432", "HOSP7634892", "PLAT-S/0124789"]);
    }

    #[test]
    fn test_search_patients_by_name_id_and_label() {
        let store = store();

        let by_name = store.search_patients("ARLIE mer");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id.as_str(), "HOSP7634892");

        let by_id = store.search_patients("plat-s/01");
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].last_name.as_str(), "Feranmi");

        let by_label = store.search_patients("olusola - hosp");
        assert_eq!(by_label.len(), 1);
        assert_eq!(by_label[0].id.as_str(), "HOSP8765432");

        assert!(store.search_patients("zzz").is_empty());
    }

    #[test]
    fn test_add_appointment_and_lookup() {
        let mut store = store();
        let arlie = store.get_patient(&pid("HOSP7634892")).unwrap().clone();
        let apt = appointment("APT003", &arlie);

        assert!(store.add_appointment(apt.clone()).unwrap());
        assert_eq!(
            store.get_appointment(&AppointmentId::parse("APT003").unwrap()),
            Some(&apt)
        );
        assert!(store
            .get_appointment(&AppointmentId::parse("APT999").unwrap())
            .is_none());
    }

    #[test]
    fn test_add_appointment_ignores_duplicate_id() {
        let mut store = store();
        let arlie = store.get_patient(&pid("HOSP7634892")).unwrap().clone();
        assert!(store.add_appointment(appointment("APT003", &arlie)).unwrap());

        let mut other = appointment("APT003", &arlie);
        other.clinic = "Renal".into();
        assert!(!store.add_appointment(other).unwrap());
        assert_eq!(store.appointments().len(), 1);
        assert_eq!(store.appointments()[0].clinic, "Neurology");
    }

    #[test]
    fn test_add_appointment_rejects_unknown_patient() {
        let mut store = store();
        let stranger = patient("HOSP0000001", "No", "Body");
        let err = store
            .add_appointment(appointment("APT010", &stranger))
            .unwrap_err();
        assert!(matches!(err, FrontDeskError::UnknownPatient { .. }));
        assert!(store.appointments().is_empty());
    }

    #[test]
    fn test_add_appointment_rejects_mismatched_embedded_patient() {
        let mut store = store();
        let arlie = store.get_patient(&pid("HOSP7634892")).unwrap().clone();
        let mut apt = appointment("APT011", &arlie);
        apt.patient_id = pid("HOSP8765432");
        assert!(matches!(
            store.add_appointment(apt),
            Err(FrontDeskError::PatientMismatch { .. })
        ));
    }

    #[test]
    fn test_add_appointment_rejects_stale_embedded_copy() {
        let mut store = store();
        let mut forged = store.get_patient(&pid("HOSP7634892")).unwrap().clone();
        forged.first_name = PersonName::new("Impostor").unwrap();
        forged.age = 99;

        let err = store
            .add_appointment(appointment("APT012", &forged))
            .unwrap_err();
        assert!(matches!(
            err,
            FrontDeskError::PatientMismatch { ref embedded_id, .. } if embedded_id == "HOSP7634892"
        ));
        assert!(store.appointments().is_empty());
    }

    #[test]
    fn test_patient_appointments_in_insertion_order() {
        let mut store = store();
        let arlie = store.get_patient(&pid("HOSP7634892")).unwrap().clone();
        let bolu = store.get_patient(&pid("HOSP8765432")).unwrap().clone();
        store.add_appointment(appointment("APT020", &arlie)).unwrap();
        store.add_appointment(appointment("APT021", &bolu)).unwrap();
        store.add_appointment(appointment("APT019", &arlie)).unwrap();

        let ids: Vec<_> = store
            .patient_appointments(&arlie.id)
            .into_iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["APT020", "APT019"]);
        assert!(store.patient_appointments(&pid("PLAT-S/0124789")).is_empty());
    }
}
