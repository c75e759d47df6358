//! Doctor directory — registration, lookup, filtered search.

use uuid::Uuid;

use super::{required_text, save_error, DirectoryError};
use crate::db::{repository, Store};
use crate::models::{Doctor, DoctorFilter, DoctorPayload};
use crate::validation;

const NOT_FOUND: &str = "Doctor not found.";
const SEARCH_MISS: &str = "No doctors found for the given filters.";

#[derive(Clone)]
pub struct DoctorDirectory {
    store: Store,
}

impl DoctorDirectory {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Register a doctor. Reports every violated field at once.
    pub fn create(&self, payload: DoctorPayload) -> Result<Doctor, DirectoryError> {
        let doctor = validate(payload, Uuid::new_v4())?;

        let conn = self.store.conn()?;
        repository::insert_doctor(&conn, &doctor).map_err(|e| save_error("doctor", e))?;
        tracing::debug!(id = %doctor.id, "doctor registered");
        Ok(doctor)
    }

    pub fn get(&self, id: Uuid) -> Result<Doctor, DirectoryError> {
        let conn = self.store.conn()?;
        repository::get_doctor(&conn, &id)?
            .ok_or_else(|| DirectoryError::DoctorNotFound(NOT_FOUND.to_string()))
    }

    /// No filters lists everyone; with at least one filter an empty
    /// result is a not-found condition.
    pub fn search(&self, filter: &DoctorFilter) -> Result<Vec<Doctor>, DirectoryError> {
        let conn = self.store.conn()?;

        if filter.is_empty() {
            return Ok(repository::get_all_doctors(&conn)?);
        }

        let doctors = repository::find_doctors(&conn, filter)?;
        if doctors.is_empty() {
            return Err(DirectoryError::DoctorNotFound(SEARCH_MISS.to_string()));
        }
        Ok(doctors)
    }

    /// Full-record replace; the id never changes.
    pub fn update(&self, id: Uuid, payload: DoctorPayload) -> Result<Doctor, DirectoryError> {
        let doctor = validate(payload, id)?;

        let conn = self.store.conn()?;
        if repository::get_doctor(&conn, &id)?.is_none() {
            return Err(DirectoryError::DoctorNotFound(NOT_FOUND.to_string()));
        }
        repository::update_doctor(&conn, &doctor).map_err(|e| save_error("doctor", e))?;
        tracing::debug!(%id, "doctor updated");
        Ok(doctor)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), DirectoryError> {
        let conn = self.store.conn()?;
        if repository::get_doctor(&conn, &id)?.is_none() {
            return Err(DirectoryError::DoctorNotFound(NOT_FOUND.to_string()));
        }
        repository::delete_doctor(&conn, &id)?;
        tracing::debug!(%id, "doctor removed");
        Ok(())
    }
}

fn validate(payload: DoctorPayload, id: Uuid) -> Result<Doctor, DirectoryError> {
    let mut violations = Vec::new();

    let name = required_text(payload.name, "name", &mut violations);
    let specialty = required_text(payload.specialty, "specialty", &mut violations);

    let crm = match payload.crm {
        Some(crm) if !crm.trim().is_empty() => {
            if !validation::is_valid_crm(&crm) {
                violations.push("Field 'crm' must be 4 to 6 digits.".to_string());
            }
            crm
        }
        _ => {
            violations.push("Field 'crm' is required.".to_string());
            String::new()
        }
    };

    let email = match payload.email {
        Some(email) if !email.trim().is_empty() => {
            if !validation::is_valid_email(&email) {
                violations.push("Field 'email' must be a valid email address.".to_string());
            }
            email
        }
        _ => {
            violations.push("Field 'email' is required.".to_string());
            String::new()
        }
    };

    if !violations.is_empty() {
        return Err(DirectoryError::Validation(violations));
    }

    Ok(Doctor {
        id,
        name,
        specialty,
        crm,
        email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> DoctorDirectory {
        DoctorDirectory::new(Store::open_in_memory().unwrap())
    }

    fn valid_payload() -> DoctorPayload {
        DoctorPayload {
            name: Some("Ana Souza".to_string()),
            specialty: Some("Cardiologia".to_string()),
            crm: Some("12345".to_string()),
            email: Some("ana.souza@clinica.com".to_string()),
        }
    }

    #[test]
    fn create_assigns_an_id_and_persists() {
        let dir = directory();
        let created = dir.create(valid_payload()).unwrap();
        assert!(!created.id.is_nil());

        let loaded = dir.get(created.id).unwrap();
        assert_eq!(loaded.name, "Ana Souza");
        assert_eq!(loaded.crm, "12345");
    }

    #[test]
    fn create_reports_every_violated_field() {
        let dir = directory();
        let err = dir.create(DoctorPayload::default()).unwrap_err();

        match err {
            DirectoryError::Validation(violations) => {
                assert_eq!(violations.len(), 4);
                assert!(violations.iter().any(|v| v.contains("'name'")));
                assert!(violations.iter().any(|v| v.contains("'specialty'")));
                assert!(violations.iter().any(|v| v.contains("'crm'")));
                assert!(violations.iter().any(|v| v.contains("'email'")));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn create_rejects_malformed_crm_and_email() {
        let dir = directory();
        let err = dir
            .create(DoctorPayload {
                crm: Some("12AB".to_string()),
                email: Some("not-an-email".to_string()),
                ..valid_payload()
            })
            .unwrap_err();

        match err {
            DirectoryError::Validation(violations) => {
                assert_eq!(violations.len(), 2);
                assert!(violations.iter().any(|v| v.contains("4 to 6 digits")));
                assert!(violations.iter().any(|v| v.contains("valid email")));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let dir = directory();
        let err = dir
            .create(DoctorPayload {
                name: Some("   ".to_string()),
                ..valid_payload()
            })
            .unwrap_err();

        match err {
            DirectoryError::Validation(violations) => {
                assert_eq!(violations, vec!["Field 'name' is required.".to_string()]);
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let dir = directory();
        let err = dir.get(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, DirectoryError::DoctorNotFound(_)));
    }

    #[test]
    fn search_without_filters_lists_everyone() {
        let dir = directory();
        assert!(dir.search(&DoctorFilter::default()).unwrap().is_empty());

        dir.create(valid_payload()).unwrap();
        dir.create(DoctorPayload {
            name: Some("Bruno Lima".to_string()),
            crm: Some("67890".to_string()),
            email: Some("bruno@clinica.com".to_string()),
            ..valid_payload()
        })
        .unwrap();

        assert_eq!(dir.search(&DoctorFilter::default()).unwrap().len(), 2);
    }

    #[test]
    fn filtered_search_with_no_match_is_not_found() {
        let dir = directory();
        dir.create(valid_payload()).unwrap();

        let err = dir
            .search(&DoctorFilter {
                name: Some("Carlos".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DirectoryError::DoctorNotFound(_)));
    }

    #[test]
    fn filters_narrow_with_and() {
        let dir = directory();
        dir.create(valid_payload()).unwrap();
        dir.create(DoctorPayload {
            name: Some("Ana Pires".to_string()),
            specialty: Some("Dermatologia".to_string()),
            crm: Some("67890".to_string()),
            email: Some("ana.pires@clinica.com".to_string()),
        })
        .unwrap();

        let both = dir
            .search(&DoctorFilter {
                name: Some("Ana".to_string()),
                specialty: Some("Derma".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].name, "Ana Pires");
    }

    #[test]
    fn update_replaces_fields_and_keeps_identity() {
        let dir = directory();
        let created = dir.create(valid_payload()).unwrap();

        let updated = dir
            .update(
                created.id,
                DoctorPayload {
                    specialty: Some("Hematologia".to_string()),
                    ..valid_payload()
                },
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.specialty, "Hematologia");
        assert_eq!(dir.get(created.id).unwrap().specialty, "Hematologia");
    }

    #[test]
    fn update_validates_before_looking_up() {
        let dir = directory();
        let err = dir.update(Uuid::new_v4(), DoctorPayload::default()).unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let dir = directory();
        let err = dir.update(Uuid::new_v4(), valid_payload()).unwrap_err();
        assert!(matches!(err, DirectoryError::DoctorNotFound(_)));
    }

    #[test]
    fn delete_removes_and_double_delete_is_not_found() {
        let dir = directory();
        let created = dir.create(valid_payload()).unwrap();

        dir.delete(created.id).unwrap();
        assert!(matches!(
            dir.get(created.id),
            Err(DirectoryError::DoctorNotFound(_))
        ));
        assert!(matches!(
            dir.delete(created.id),
            Err(DirectoryError::DoctorNotFound(_))
        ));
    }
}
