//! Shared state for the API layer.

use crate::db::Store;
use crate::directory::{AppointmentScheduler, DoctorDirectory, PatientDirectory};

/// Shared context for all routes. Cheap to clone; every clone talks to
/// the same store.
#[derive(Clone)]
pub struct ApiContext {
    pub doctors: DoctorDirectory,
    pub patients: PatientDirectory,
    pub scheduler: AppointmentScheduler,
}

impl ApiContext {
    pub fn new(store: Store) -> Self {
        let doctors = DoctorDirectory::new(store.clone());
        let patients = PatientDirectory::new(store.clone());
        let scheduler = AppointmentScheduler::new(store, doctors.clone(), patients.clone());
        Self {
            doctors,
            patients,
            scheduler,
        }
    }
}
