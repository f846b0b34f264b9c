use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::identity::PatientId;
use crate::models::{Appointment, AppointmentStatus, AppointmentSummary};

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments
         (token, patient_id, doctor_name, requested_date, phone, email, message, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            appt.token.to_string(),
            appt.patient_id.0,
            appt.doctor_name,
            appt.requested_date.to_string(),
            appt.phone,
            appt.email,
            appt.message,
            appt.status.as_str(),
            appt.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_appointment_by_token(
    conn: &Connection,
    token: &Uuid,
) -> Result<Option<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT token, patient_id, doctor_name, requested_date, phone, email, message, status, created_at
         FROM appointments WHERE token = ?1",
    )?;

    let result = stmt.query_row(params![token.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, String>(6)?,
            row.get::<_, String>(7)?,
            row.get::<_, String>(8)?,
        ))
    });

    let raw = match result {
        Ok(raw) => raw,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let (token, patient_id, doctor_name, requested_date, phone, email, message, status, created_at) = raw;
    Ok(Some(Appointment {
        token: Uuid::parse_str(&token)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        patient_id: PatientId(patient_id),
        doctor_name,
        requested_date: NaiveDate::parse_from_str(&requested_date, "%Y-%m-%d")
            .unwrap_or_default(),
        phone,
        email,
        message,
        status: AppointmentStatus::from_str(&status)?,
        created_at: NaiveDateTime::parse_from_str(&created_at, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
    }))
}

/// Conditional transition out of `pending`. Returns the number of rows
/// changed: 0 means the token is unknown, already terminal, or a
/// concurrent transition won the race — the caller decides which.
pub fn update_status_if_pending(
    conn: &Connection,
    token: &Uuid,
    new_status: AppointmentStatus,
) -> Result<usize, DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments SET status = ?1 WHERE token = ?2 AND status = 'pending'",
        params![new_status.as_str(), token.to_string()],
    )?;
    Ok(changed)
}

/// Owner-scoped cancellation. The predicate matches token AND owner AND
/// `pending`, so a mismatched owner changes nothing (zero rows).
pub fn cancel_if_owner(
    conn: &Connection,
    token: &Uuid,
    owner: PatientId,
) -> Result<usize, DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments SET status = 'cancelled'
         WHERE token = ?1 AND patient_id = ?2 AND status = 'pending'",
        params![token.to_string(), owner.0],
    )?;
    Ok(changed)
}

pub fn list_pending(conn: &Connection) -> Result<Vec<AppointmentSummary>, DatabaseError> {
    summaries(
        conn,
        "SELECT token, patient_id, doctor_name, requested_date, status
         FROM appointments WHERE status = 'pending'",
        params![],
    )
}

pub fn list_for_patient(
    conn: &Connection,
    patient: PatientId,
) -> Result<Vec<AppointmentSummary>, DatabaseError> {
    summaries(
        conn,
        "SELECT token, patient_id, doctor_name, requested_date, status
         FROM appointments WHERE patient_id = ?1",
        params![patient.0],
    )
}

pub fn list_approved(
    conn: &Connection,
    doctor_name: &str,
    date: NaiveDate,
) -> Result<Vec<AppointmentSummary>, DatabaseError> {
    summaries(
        conn,
        "SELECT token, patient_id, doctor_name, requested_date, status
         FROM appointments
         WHERE doctor_name = ?1 AND requested_date = ?2 AND status = 'approved'",
        params![doctor_name, date.to_string()],
    )
}

fn summaries(
    conn: &Connection,
    sql: &str,
    args: impl rusqlite::Params,
) -> Result<Vec<AppointmentSummary>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for row in rows {
        let (token, patient_id, doctor_name, requested_date, status) = row?;
        out.push(AppointmentSummary {
            token: Uuid::parse_str(&token)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            patient_id: PatientId(patient_id),
            doctor_name,
            requested_date: NaiveDate::parse_from_str(&requested_date, "%Y-%m-%d")
                .unwrap_or_default(),
            status: AppointmentStatus::from_str(&status)?,
        });
    }
    Ok(out)
}
