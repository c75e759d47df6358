use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

const DB_DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";

const SELECT_COLUMNS: &str = "SELECT id, doctor_id, patient_id, scheduled_at, status FROM appointments";

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, doctor_id, patient_id, scheduled_at, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            appt.id.to_string(),
            appt.doctor_id.to_string(),
            appt.patient_id.to_string(),
            appt.scheduled_at.format(DB_DATE_TIME).to_string(),
            appt.status.as_str(),
        ],
    )?;
    Ok(())
}

pub fn get_appointment(conn: &Connection, id: &Uuid) -> Result<Option<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok(appointment_row_from_rusqlite(row))
    });

    match result {
        Ok(row) => Ok(Some(appointment_from_row(row?)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_all_appointments(conn: &Connection) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(SELECT_COLUMNS)?;
    let rows = stmt.query_map([], |row| Ok(appointment_row_from_rusqlite(row)))?;
    collect_appointments(rows)
}

pub fn find_appointments_by_doctor(
    conn: &Connection,
    doctor_id: &Uuid,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE doctor_id = ?1"))?;
    let rows = stmt.query_map(params![doctor_id.to_string()], |row| {
        Ok(appointment_row_from_rusqlite(row))
    })?;
    collect_appointments(rows)
}

pub fn find_appointments_by_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE patient_id = ?1"))?;
    let rows = stmt.query_map(params![patient_id.to_string()], |row| {
        Ok(appointment_row_from_rusqlite(row))
    })?;
    collect_appointments(rows)
}

pub fn find_appointments_by_patient_and_doctor(
    conn: &Connection,
    patient_id: &Uuid,
    doctor_id: &Uuid,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt =
        conn.prepare(&format!("{SELECT_COLUMNS} WHERE patient_id = ?1 AND doctor_id = ?2"))?;
    let rows = stmt.query_map(
        params![patient_id.to_string(), doctor_id.to_string()],
        |row| Ok(appointment_row_from_rusqlite(row)),
    )?;
    collect_appointments(rows)
}

pub fn update_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE appointments SET doctor_id = ?2, patient_id = ?3, scheduled_at = ?4, status = ?5
         WHERE id = ?1",
        params![
            appt.id.to_string(),
            appt.doctor_id.to_string(),
            appt.patient_id.to_string(),
            appt.scheduled_at.format(DB_DATE_TIME).to_string(),
            appt.status.as_str(),
        ],
    )?;
    Ok(())
}

pub fn set_appointment_status(
    conn: &Connection,
    id: &Uuid,
    status: AppointmentStatus,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE appointments SET status = ?2 WHERE id = ?1",
        params![id.to_string(), status.as_str()],
    )?;
    Ok(())
}

pub fn delete_appointment(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM appointments WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(())
}

struct AppointmentRow {
    id: String,
    doctor_id: String,
    patient_id: String,
    scheduled_at: String,
    status: String,
}

fn appointment_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<AppointmentRow, rusqlite::Error> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        doctor_id: row.get(1)?,
        patient_id: row.get(2)?,
        scheduled_at: row.get(3)?,
        status: row.get(4)?,
    })
}

fn appointment_from_row(row: AppointmentRow) -> Result<Appointment, DatabaseError> {
    Ok(Appointment {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        doctor_id: Uuid::parse_str(&row.doctor_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        patient_id: Uuid::parse_str(&row.patient_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        scheduled_at: NaiveDateTime::parse_from_str(&row.scheduled_at, DB_DATE_TIME)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        status: AppointmentStatus::from_str(&row.status)?,
    })
}

fn collect_appointments(
    rows: impl Iterator<Item = rusqlite::Result<rusqlite::Result<AppointmentRow>>>,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(appointment_from_row(row??)?);
    }
    Ok(appointments)
}
