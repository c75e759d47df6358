use chrono::NaiveDate;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, name, cpf, birth_date, phone)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            patient.id.to_string(),
            patient.name,
            patient.cpf,
            patient.birth_date.to_string(),
            patient.phone,
        ],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, cpf, birth_date, phone FROM patients WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| Ok(patient_row_from_rusqlite(row)));

    match result {
        Ok(row) => Ok(Some(patient_from_row(row?)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_all_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name, cpf, birth_date, phone FROM patients")?;
    let rows = stmt.query_map([], |row| Ok(patient_row_from_rusqlite(row)))?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(patient_from_row(row??)?);
    }
    Ok(patients)
}

/// Name is a case-sensitive substring match, CPF exact against the
/// digits-only stored form; both provided means both must hold.
pub fn find_patients(conn: &Connection, filter: &PatientFilter) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, cpf, birth_date, phone FROM patients
         WHERE (?1 IS NULL OR instr(name, ?1) > 0)
           AND (?2 IS NULL OR cpf = ?2)",
    )?;

    let rows = stmt.query_map(params![filter.name, filter.cpf], |row| {
        Ok(patient_row_from_rusqlite(row))
    })?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(patient_from_row(row??)?);
    }
    Ok(patients)
}

pub fn update_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE patients SET name = ?2, cpf = ?3, birth_date = ?4, phone = ?5 WHERE id = ?1",
        params![
            patient.id.to_string(),
            patient.name,
            patient.cpf,
            patient.birth_date.to_string(),
            patient.phone,
        ],
    )?;
    Ok(())
}

pub fn delete_patient(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM patients WHERE id = ?1", params![id.to_string()])?;
    Ok(())
}

struct PatientRow {
    id: String,
    name: String,
    cpf: String,
    birth_date: String,
    phone: String,
}

fn patient_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<PatientRow, rusqlite::Error> {
    Ok(PatientRow {
        id: row.get(0)?,
        name: row.get(1)?,
        cpf: row.get(2)?,
        birth_date: row.get(3)?,
        phone: row.get(4)?,
    })
}

fn patient_from_row(row: PatientRow) -> Result<Patient, DatabaseError> {
    Ok(Patient {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        name: row.name,
        cpf: row.cpf,
        birth_date: NaiveDate::parse_from_str(&row.birth_date, "%Y-%m-%d")
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        phone: row.phone,
    })
}
