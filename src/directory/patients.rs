//! Patient directory — registration, lookup, name/CPF search.

use chrono::NaiveDate;
use uuid::Uuid;

use super::{save_error, DirectoryError};
use crate::db::{repository, Store};
use crate::format;
use crate::models::{Patient, PatientFilter, PatientPayload};
use crate::validation;

const NOT_FOUND: &str = "Patient not found.";

#[derive(Clone)]
pub struct PatientDirectory {
    store: Store,
}

impl PatientDirectory {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Register a patient. Reports every violated field at once; CPF and
    /// phone are normalized to bare digits before checking and storing.
    pub fn create(&self, payload: PatientPayload) -> Result<Patient, DirectoryError> {
        let patient = validate(payload, Uuid::new_v4())?;

        let conn = self.store.conn()?;
        repository::insert_patient(&conn, &patient).map_err(|e| save_error("patient", e))?;
        tracing::debug!(id = %patient.id, "patient registered");
        Ok(patient)
    }

    pub fn get(&self, id: Uuid) -> Result<Patient, DirectoryError> {
        let conn = self.store.conn()?;
        repository::get_patient(&conn, &id)?
            .ok_or_else(|| DirectoryError::PatientNotFound(NOT_FOUND.to_string()))
    }

    /// Name is a substring match, CPF exact after normalization, both
    /// together must both hold. No filters lists everyone; with filters
    /// an empty result is a not-found naming the searched values.
    pub fn search(&self, filter: &PatientFilter) -> Result<Vec<Patient>, DirectoryError> {
        let conn = self.store.conn()?;

        if filter.is_empty() {
            return Ok(repository::get_all_patients(&conn)?);
        }

        let normalized = PatientFilter {
            name: filter.name.clone(),
            cpf: filter.cpf.as_deref().map(validation::normalize_digits),
        };

        let patients = repository::find_patients(&conn, &normalized)?;
        if patients.is_empty() {
            return Err(DirectoryError::PatientNotFound(search_miss_message(filter)));
        }
        Ok(patients)
    }

    /// Full-record replace; the id never changes.
    pub fn update(&self, id: Uuid, payload: PatientPayload) -> Result<Patient, DirectoryError> {
        let patient = validate(payload, id)?;

        let conn = self.store.conn()?;
        if repository::get_patient(&conn, &id)?.is_none() {
            return Err(DirectoryError::PatientNotFound(NOT_FOUND.to_string()));
        }
        repository::update_patient(&conn, &patient).map_err(|e| save_error("patient", e))?;
        tracing::debug!(%id, "patient updated");
        Ok(patient)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), DirectoryError> {
        let conn = self.store.conn()?;
        if repository::get_patient(&conn, &id)?.is_none() {
            return Err(DirectoryError::PatientNotFound(NOT_FOUND.to_string()));
        }
        repository::delete_patient(&conn, &id)?;
        tracing::debug!(%id, "patient removed");
        Ok(())
    }
}

// The message echoes the values as searched, not the normalized forms.
fn search_miss_message(filter: &PatientFilter) -> String {
    let mut parts = Vec::new();
    if let Some(name) = &filter.name {
        parts.push(format!("name: {name}"));
    }
    if let Some(cpf) = &filter.cpf {
        parts.push(format!("CPF: {cpf}"));
    }
    format!("No patients found for {}.", parts.join(", "))
}

fn validate(payload: PatientPayload, id: Uuid) -> Result<Patient, DirectoryError> {
    let mut violations = Vec::new();

    let name = match payload.name {
        Some(name) if !name.trim().is_empty() => {
            if !(2..=100).contains(&name.chars().count()) {
                violations.push("Field 'name' must be between 2 and 100 characters.".to_string());
            }
            name
        }
        _ => {
            violations.push("Field 'name' is required.".to_string());
            String::new()
        }
    };

    let cpf = match payload.cpf.as_deref() {
        Some(raw) => {
            let digits = validation::normalize_digits(raw);
            if digits.len() != 11 {
                violations.push("Field 'cpf' must have exactly 11 digits.".to_string());
            } else if !validation::is_valid_cpf(&digits) {
                violations.push("Field 'cpf' is not a valid CPF.".to_string());
            }
            digits
        }
        None => {
            violations.push("Field 'cpf' is required.".to_string());
            String::new()
        }
    };

    let birth_date: Option<NaiveDate> = match payload.birth_date.as_deref() {
        Some(raw) => match format::parse_date(raw) {
            Ok(date) => Some(date),
            Err(_) => {
                violations.push(
                    "Field 'birth_date' must use the dd/MM/yyyy or ddMMyyyy format.".to_string(),
                );
                None
            }
        },
        None => {
            violations.push("Field 'birth_date' is required.".to_string());
            None
        }
    };

    let phone = match payload.phone.as_deref() {
        Some(raw) => {
            let digits = validation::normalize_digits(raw);
            if !validation::is_valid_phone(&digits) {
                violations.push("Field 'phone' must have 10 or 11 digits.".to_string());
            }
            digits
        }
        None => {
            violations.push("Field 'phone' is required.".to_string());
            String::new()
        }
    };

    match birth_date {
        Some(birth_date) if violations.is_empty() => Ok(Patient {
            id,
            name,
            cpf,
            birth_date,
            phone,
        }),
        _ => Err(DirectoryError::Validation(violations)),
    }
}
