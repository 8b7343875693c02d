//! Front desk service.
//!
//! [`FrontDesk`] owns the session's [`RecordStore`] together with the clock and identifier
//! generator that registration and booking need. It is the write path: forms go in, are
//! validated against the clock, and only valid records reach the store.

use std::sync::Arc;

use frontdesk_ids::IdGenerator;

use crate::appointment::Appointment;
use crate::clock::{Clock, SystemClock};
use crate::config::CoreConfig;
use crate::patient::Patient;
use crate::query::{paginate, AppointmentQuery, Page};
use crate::seed::{Seed, SeedSummary};
use crate::store::RecordStore;
use crate::validation::{
    create_appointment, patient_from_form, validate_appointment_form, validate_patient_form,
    AppointmentForm, PatientForm,
};
use crate::{FrontDeskError, FrontDeskResult};

pub struct FrontDesk<C: Clock = SystemClock> {
    cfg: Arc<CoreConfig>,
    store: RecordStore,
    clock: C,
    ids: IdGenerator,
}

impl FrontDesk<SystemClock> {
    /// Creates a front desk on the system clock, seeded from `cfg.seed()`.
    ///
    /// # Errors
    ///
    /// Returns a `FrontDeskError` if the seed cannot be read, parsed or applied.
    pub fn new(cfg: Arc<CoreConfig>) -> FrontDeskResult<Self> {
        Self::seeded(cfg, SystemClock, IdGenerator::new())
    }
}

impl<C: Clock> FrontDesk<C> {
    /// Creates a front desk over an existing store. No seeding happens.
    pub fn with_store(cfg: Arc<CoreConfig>, store: RecordStore, clock: C, ids: IdGenerator) -> Self {
        Self {
            cfg,
            store,
            clock,
            ids,
        }
    }

    /// Creates a front desk seeded from `cfg.seed()`, deriving ages against `clock`.
    pub fn seeded(cfg: Arc<CoreConfig>, clock: C, ids: IdGenerator) -> FrontDeskResult<Self> {
        let seed = Seed::from_source(cfg.seed())?;
        let mut desk = Self::with_store(cfg, RecordStore::new(), clock, ids);
        desk.load(seed)?;
        Ok(desk)
    }

    /// Apply additional seed records to the store.
    pub fn load(&mut self, seed: Seed) -> FrontDeskResult<SeedSummary> {
        seed.apply(&mut self.store, self.clock.today())
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Validates an intake form and, if valid, registers the patient.
    ///
    /// # Errors
    ///
    /// Returns [`FrontDeskError::PatientRejected`] carrying the field errors if the form is
    /// invalid, or [`FrontDeskError::DuplicateId`] if the patient id is already taken.
    pub fn register_patient(&mut self, form: &PatientForm) -> FrontDeskResult<Patient> {
        let today = self.clock.today();
        let errors = validate_patient_form(form, today);
        if !errors.is_empty() {
            tracing::debug!("patient form rejected: {}", errors);
            return Err(FrontDeskError::PatientRejected(errors));
        }

        let patient = patient_from_form(form, today, &mut self.ids)?;
        if !self.store.add_patient(patient.clone()) {
            return Err(FrontDeskError::DuplicateId(patient.id.to_string()));
        }

        tracing::info!("registered patient {}", patient.id);
        Ok(patient)
    }

    /// Validates a booking form and, if valid, books the appointment.
    ///
    /// # Errors
    ///
    /// Returns [`FrontDeskError::AppointmentRejected`] carrying the field errors if the form is
    /// invalid, [`FrontDeskError::DuplicateId`] if the generated id is already taken, or a store
    /// error if the selected patient is not registered.
    pub fn book_appointment(&mut self, form: &AppointmentForm) -> FrontDeskResult<Appointment> {
        let errors = validate_appointment_form(form, self.clock.now());
        if !errors.is_empty() {
            tracing::debug!("appointment form rejected: {}", errors);
            return Err(FrontDeskError::AppointmentRejected(errors));
        }

        let appointment = create_appointment(form, &mut self.ids)?;
        if !self.store.add_appointment(appointment.clone())? {
            return Err(FrontDeskError::DuplicateId(appointment.id.to_string()));
        }

        tracing::info!(
            "booked appointment {} for patient {} at {}",
            appointment.id,
            appointment.patient_id,
            appointment.clinic
        );
        Ok(appointment)
    }

    /// One page of the appointment list for `query`.
    ///
    /// Uses the configured page size and, when the query has no sort key, the configured default
    /// sort.
    pub fn dashboard(&self, query: &AppointmentQuery, page: usize) -> Page<&Appointment> {
        let view = query.apply_with_default(self.store.appointments(), self.cfg.default_sort());
        paginate(&view, page, self.cfg.page_size())
    }
}
