use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (id, name, specialty, crm, email)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            doctor.id.to_string(),
            doctor.name,
            doctor.specialty,
            doctor.crm,
            doctor.email,
        ],
    )?;
    Ok(())
}

pub fn get_doctor(conn: &Connection, id: &Uuid) -> Result<Option<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, specialty, crm, email FROM doctors WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], doctor_from_row);

    match result {
        Ok(doctor) => Ok(Some(doctor)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_all_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name, specialty, crm, email FROM doctors")?;
    let rows = stmt.query_map([], doctor_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Filtered search. Each provided field is a case-sensitive substring
/// match (`instr`, since SQLite `LIKE` folds ASCII case); provided
/// fields combine with AND, absent ones fall out via the NULL arms.
pub fn find_doctors(conn: &Connection, filter: &DoctorFilter) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, specialty, crm, email FROM doctors
         WHERE (?1 IS NULL OR instr(name, ?1) > 0)
           AND (?2 IS NULL OR instr(specialty, ?2) > 0)
           AND (?3 IS NULL OR instr(crm, ?3) > 0)",
    )?;

    let rows = stmt.query_map(
        params![filter.name, filter.specialty, filter.crm],
        doctor_from_row,
    )?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE doctors SET name = ?2, specialty = ?3, crm = ?4, email = ?5 WHERE id = ?1",
        params![
            doctor.id.to_string(),
            doctor.name,
            doctor.specialty,
            doctor.crm,
            doctor.email,
        ],
    )?;
    Ok(())
}

pub fn delete_doctor(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM doctors WHERE id = ?1", params![id.to_string()])?;
    Ok(())
}

fn doctor_from_row(row: &rusqlite::Row<'_>) -> Result<Doctor, rusqlite::Error> {
    Ok(Doctor {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
        name: row.get(1)?,
        specialty: row.get(2)?,
        crm: row.get(3)?,
        email: row.get(4)?,
    })
}
