//! Appointment scheduler — resolves doctor and patient references through
//! the directories before any write, so a dangling reference can never be
//! persisted by this component.

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::{save_error, DirectoryError, DoctorDirectory, PatientDirectory};
use crate::db::{repository, Store};
use crate::format;
use crate::models::{Appointment, AppointmentFilter, AppointmentPayload, AppointmentStatus};

const NOT_FOUND: &str = "Appointment not found.";

#[derive(Clone)]
pub struct AppointmentScheduler {
    store: Store,
    doctors: DoctorDirectory,
    patients: PatientDirectory,
}

impl AppointmentScheduler {
    pub fn new(store: Store, doctors: DoctorDirectory, patients: PatientDirectory) -> Self {
        Self {
            store,
            doctors,
            patients,
        }
    }

    /// Book an appointment. Both references are resolved first; nothing
    /// is written when either lookup fails.
    pub fn schedule(&self, payload: AppointmentPayload) -> Result<Appointment, DirectoryError> {
        let request = validate(payload)?;
        self.doctors.get(request.doctor_id)?;
        self.patients.get(request.patient_id)?;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            doctor_id: request.doctor_id,
            patient_id: request.patient_id,
            scheduled_at: request.scheduled_at,
            status: request.status,
        };

        let conn = self.store.conn()?;
        repository::insert_appointment(&conn, &appointment)
            .map_err(|e| save_error("appointment", e))?;
        tracing::debug!(id = %appointment.id, "appointment booked");
        Ok(appointment)
    }

    pub fn get(&self, id: Uuid) -> Result<Appointment, DirectoryError> {
        let conn = self.store.conn()?;
        repository::get_appointment(&conn, &id)?
            .ok_or_else(|| DirectoryError::AppointmentNotFound(NOT_FOUND.to_string()))
    }

    /// Filter precedence: an appointment id wins outright (singleton or
    /// empty list, other filters ignored), then patient+doctor, then
    /// either alone, then everything. Never errors on an empty result.
    pub fn search(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, DirectoryError> {
        let conn = self.store.conn()?;

        if let Some(id) = filter.appointment_id {
            return Ok(repository::get_appointment(&conn, &id)?.into_iter().collect());
        }

        let appointments = match (filter.patient_id, filter.doctor_id) {
            (Some(patient_id), Some(doctor_id)) => {
                repository::find_appointments_by_patient_and_doctor(&conn, &patient_id, &doctor_id)?
            }
            (Some(patient_id), None) => repository::find_appointments_by_patient(&conn, &patient_id)?,
            (None, Some(doctor_id)) => repository::find_appointments_by_doctor(&conn, &doctor_id)?,
            (None, None) => repository::get_all_appointments(&conn)?,
        };
        Ok(appointments)
    }

    /// Full-record replace; re-resolves both references.
    pub fn update(&self, id: Uuid, payload: AppointmentPayload) -> Result<Appointment, DirectoryError> {
        let request = validate(payload)?;
        self.get(id)?;
        self.doctors.get(request.doctor_id)?;
        self.patients.get(request.patient_id)?;

        let appointment = Appointment {
            id,
            doctor_id: request.doctor_id,
            patient_id: request.patient_id,
            scheduled_at: request.scheduled_at,
            status: request.status,
        };

        let conn = self.store.conn()?;
        repository::update_appointment(&conn, &appointment)
            .map_err(|e| save_error("appointment", e))?;
        tracing::debug!(%id, "appointment updated");
        Ok(appointment)
    }

    /// Soft removal: marks the appointment CANCELLED and keeps the
    /// record. Cancelling twice succeeds both times.
    pub fn cancel(&self, id: Uuid) -> Result<(), DirectoryError> {
        let conn = self.store.conn()?;
        if repository::get_appointment(&conn, &id)?.is_none() {
            return Err(DirectoryError::AppointmentNotFound(NOT_FOUND.to_string()));
        }
        repository::set_appointment_status(&conn, &id, AppointmentStatus::Cancelled)
            .map_err(|e| save_error("appointment", e))?;
        tracing::debug!(%id, "appointment cancelled");
        Ok(())
    }

    /// Hard removal. The HTTP surface maps DELETE to `cancel`; this is
    /// for library callers that really want the record gone.
    pub fn delete(&self, id: Uuid) -> Result<(), DirectoryError> {
        let conn = self.store.conn()?;
        if repository::get_appointment(&conn, &id)?.is_none() {
            return Err(DirectoryError::AppointmentNotFound(NOT_FOUND.to_string()));
        }
        repository::delete_appointment(&conn, &id)?;
        tracing::debug!(%id, "appointment removed");
        Ok(())
    }
}

struct ValidAppointment {
    doctor_id: Uuid,
    patient_id: Uuid,
    scheduled_at: NaiveDateTime,
    status: AppointmentStatus,
}

// Missing fields are all reported together; a present but malformed
// date is an invalid-date failure of its own.
fn validate(payload: AppointmentPayload) -> Result<ValidAppointment, DirectoryError> {
    let mut violations = Vec::new();
    if payload.doctor_id.is_none() {
        violations.push("Field 'doctor_id' is required.".to_string());
    }
    if payload.patient_id.is_none() {
        violations.push("Field 'patient_id' is required.".to_string());
    }
    if payload.scheduled_at.is_none() {
        violations.push("Field 'scheduled_at' is required.".to_string());
    }

    let (Some(doctor_id), Some(patient_id), Some(raw)) =
        (payload.doctor_id, payload.patient_id, payload.scheduled_at)
    else {
        return Err(DirectoryError::Validation(violations));
    };

    let scheduled_at = format::parse_date_time(&raw)?;

    Ok(ValidAppointment {
        doctor_id,
        patient_id,
        scheduled_at,
        status: payload.status.unwrap_or_default(),
    })
}
