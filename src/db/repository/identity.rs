use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::identity::{AdminId, PatientId};
use crate::models::{Admin, Patient};

pub fn insert_patient(
    conn: &Connection,
    name: &str,
    email: &str,
    phone: Option<&str>,
    secret: &str,
) -> Result<PatientId, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (name, email, phone, secret) VALUES (?1, ?2, ?3, ?4)",
        params![name, email, phone, secret],
    )?;
    Ok(PatientId(conn.last_insert_rowid()))
}

pub fn get_patient(conn: &Connection, id: PatientId) -> Result<Option<Patient>, DatabaseError> {
    let patient = conn
        .query_row(
            "SELECT id, name, email, phone FROM patients WHERE id = ?1",
            params![id.0],
            |row| {
                Ok(Patient {
                    id: PatientId(row.get(0)?),
                    name: row.get(1)?,
                    email: row.get(2)?,
                    phone: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(patient)
}

/// Display name for notification composition. A missing patient is a
/// hard error here: approve/reject abort on it before touching state.
pub fn patient_display_name(conn: &Connection, id: PatientId) -> Result<String, DatabaseError> {
    conn.query_row(
        "SELECT name FROM patients WHERE id = ?1",
        params![id.0],
        |row| row.get(0),
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DatabaseError::NotFound {
            entity_type: "Patient".into(),
            id: id.to_string(),
        },
        other => DatabaseError::from(other),
    })
}

pub fn insert_admin(
    conn: &Connection,
    name: &str,
    email: &str,
    secret: &str,
) -> Result<AdminId, DatabaseError> {
    conn.execute(
        "INSERT INTO admins (name, email, secret) VALUES (?1, ?2, ?3)",
        params![name, email, secret],
    )?;
    Ok(AdminId(conn.last_insert_rowid()))
}

pub fn get_admin(conn: &Connection, id: AdminId) -> Result<Option<Admin>, DatabaseError> {
    let admin = conn
        .query_row(
            "SELECT id, name, email FROM admins WHERE id = ?1",
            params![id.0],
            |row| {
                Ok(Admin {
                    id: AdminId(row.get(0)?),
                    name: row.get(1)?,
                    email: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(admin)
}

/// Credential check against the stored secret. Hashing is the
/// authentication provider's concern; secrets are compared as opaque
/// strings and never logged.
pub fn verify_patient_credentials(
    conn: &Connection,
    email: &str,
    secret: &str,
) -> Result<Option<PatientId>, DatabaseError> {
    let id = conn
        .query_row(
            "SELECT id FROM patients WHERE email = ?1 AND secret = ?2",
            params![email, secret],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(id.map(PatientId))
}

pub fn verify_admin_credentials(
    conn: &Connection,
    email: &str,
    secret: &str,
) -> Result<Option<AdminId>, DatabaseError> {
    let id = conn
        .query_row(
            "SELECT id FROM admins WHERE email = ?1 AND secret = ?2",
            params![email, secret],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(id.map(AdminId))
}
