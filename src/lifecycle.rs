//! Appointment lifecycle manager.
//!
//! Owns the appointment state machine and the notification fan-out tied
//! to it:
//!
//! ```text
//!  (none) --create--> pending --approve--> approved
//!                         |
//!                         +--reject------> rejected
//!                         |
//!                         +--cancel------> cancelled   (patient-initiated)
//! ```
//!
//! `approved`, `rejected` and `cancelled` are terminal; there is no
//! re-open. Concurrency control is the conditional status update at the
//! storage layer: the loser of a race changes zero rows and gets
//! [`LifecycleError::Conflict`], never a silent success.
//!
//! Notification appends run after the committed transition and are
//! best-effort: a failed append is logged and does not roll anything
//! back. Callers get an at-least-once, not exactly-once, guarantee.

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{repository, DatabaseError};
use crate::identity::{AdminId, PatientId};
use crate::models::{
    Appointment, AppointmentStatus, AppointmentSummary, NewAppointment, Notification,
    NotificationChannel,
};

// ─── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("Appointment {token} is not pending")]
    Conflict { token: Uuid },

    #[error("Missing required field: {field}")]
    Validation { field: &'static str },

    #[error("Storage failure: {0}")]
    Store(DatabaseError),
}

impl From<DatabaseError> for LifecycleError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            other => {
                // Persistence failures are opaque to callers but never silent
                tracing::error!(error = %other, "storage failure");
                Self::Store(other)
            }
        }
    }
}

// ─── Doctor time slots ────────────────────────────────────────────────────────

/// Consultation slot handed to any doctor outside the fixed table.
/// Unrecognized doctor names deliberately fall back to this slot
/// rather than erroring.
pub const DEFAULT_TIME_SLOT: &str = "4.00 PM to 6.00 PM";

/// Static doctor → consultation slot table. Not stored per row.
pub const DOCTOR_TIME_SLOTS: &[(&str, &str)] = &[
    ("Dr. Fakharuddin Ahmed", "10.00 AM to 12.00 PM"),
    ("Dr. Taslima Khatun", "2.30 PM to 4.00 PM"),
];

pub fn time_slot_for(doctor_name: &str) -> &'static str {
    DOCTOR_TIME_SLOTS
        .iter()
        .find(|(doctor, _)| *doctor == doctor_name)
        .map(|(_, slot)| *slot)
        .unwrap_or(DEFAULT_TIME_SLOT)
}

// ─── Notices ──────────────────────────────────────────────────────────────────

const BOOKING_CONFIRMATION: &str = "Your appointment request has been sent successfully.";

/// Append a notice after a committed transition. Failures are logged,
/// never propagated: the state change already happened.
fn notify_best_effort(
    conn: &Connection,
    channel: NotificationChannel,
    recipient_key: &str,
    message: &str,
) {
    if let Err(e) = repository::append_notice(conn, channel, recipient_key, message) {
        warn!(
            channel = channel.as_str(),
            recipient_key,
            error = %e,
            "notification append failed; transition already committed"
        );
    }
}

// ─── Transitions ──────────────────────────────────────────────────────────────

/// Book an appointment for `patient`. Only field presence is checked:
/// the doctor name is not matched against the slot table and the date
/// is not range-checked. Returns the fresh opaque token; the internal
/// row id stays internal.
pub fn create_appointment(
    conn: &Connection,
    patient: PatientId,
    booking: &NewAppointment,
) -> Result<Uuid, LifecycleError> {
    if booking.doctor_name.trim().is_empty() {
        return Err(LifecycleError::Validation { field: "doctor_name" });
    }
    if booking.phone.trim().is_empty() {
        return Err(LifecycleError::Validation { field: "phone" });
    }
    if booking.email.trim().is_empty() {
        return Err(LifecycleError::Validation { field: "email" });
    }
    let requested_date = NaiveDate::parse_from_str(&booking.requested_date, "%Y-%m-%d")
        .map_err(|_| LifecycleError::Validation { field: "requested_date" })?;

    let token = Uuid::new_v4();
    repository::insert_appointment(
        conn,
        &Appointment {
            token,
            patient_id: patient,
            doctor_name: booking.doctor_name.clone(),
            requested_date,
            phone: booking.phone.clone(),
            email: booking.email.clone(),
            message: booking.message.clone(),
            status: AppointmentStatus::Pending,
            created_at: chrono::Local::now().naive_local(),
        },
    )?;

    info!(%token, patient = %patient, doctor = %booking.doctor_name, "appointment requested");

    notify_best_effort(
        conn,
        NotificationChannel::Patient,
        &token.to_string(),
        BOOKING_CONFIRMATION,
    );
    notify_best_effort(
        conn,
        NotificationChannel::Admin,
        &patient.to_string(),
        &format!(
            "New appointment request for {} on {}.",
            booking.doctor_name, requested_date
        ),
    );

    Ok(token)
}

/// Approve a pending appointment. The patient-name lookup runs first so
/// a missing patient aborts before any state changes; the conditional
/// update then arbitrates concurrent transitions.
pub fn approve_appointment(
    conn: &Connection,
    admin: AdminId,
    token: &Uuid,
    patient: PatientId,
) -> Result<(), LifecycleError> {
    let patient_name = repository::patient_display_name(conn, patient)?;
    let appt = require_pending(conn, token)?;

    let changed = repository::update_status_if_pending(conn, token, AppointmentStatus::Approved)?;
    if changed == 0 {
        return Err(LifecycleError::Conflict { token: *token });
    }

    info!(%token, admin = %admin, doctor = %appt.doctor_name, "appointment approved");

    let slot = time_slot_for(&appt.doctor_name);
    notify_best_effort(
        conn,
        NotificationChannel::Patient,
        &token.to_string(),
        &format!(
            "Dear {patient_name}, your appointment with {} has been approved. \
             Please attend on {} between {slot}.",
            appt.doctor_name, appt.requested_date
        ),
    );
    Ok(())
}

/// Reject a pending appointment. The reason is embedded verbatim in the
/// patient notice; it reaches the store only as a bound parameter.
pub fn reject_appointment(
    conn: &Connection,
    admin: AdminId,
    token: &Uuid,
    patient: PatientId,
    reason: &str,
) -> Result<(), LifecycleError> {
    let patient_name = repository::patient_display_name(conn, patient)?;
    let appt = require_pending(conn, token)?;

    let changed = repository::update_status_if_pending(conn, token, AppointmentStatus::Rejected)?;
    if changed == 0 {
        return Err(LifecycleError::Conflict { token: *token });
    }

    info!(%token, admin = %admin, doctor = %appt.doctor_name, "appointment rejected");

    notify_best_effort(
        conn,
        NotificationChannel::Patient,
        &token.to_string(),
        &format!(
            "Dear {patient_name}, your appointment with {} has been rejected. Reason: {reason}",
            appt.doctor_name
        ),
    );
    Ok(())
}

/// Patient-initiated cancellation. The update predicate matches token,
/// owner and `pending` together, so a mismatched owner (or an already
/// terminal appointment) cancels nothing and returns Ok — the silent
/// no-op the portal has always had. No notification is generated.
pub fn cancel_appointment(
    conn: &Connection,
    patient: PatientId,
    token: &Uuid,
) -> Result<(), LifecycleError> {
    let changed = repository::cancel_if_owner(conn, token, patient)?;
    if changed == 1 {
        info!(%token, patient = %patient, "appointment cancelled");
    }
    Ok(())
}

fn require_pending(conn: &Connection, token: &Uuid) -> Result<Appointment, LifecycleError> {
    let appt = repository::get_appointment_by_token(conn, token)?.ok_or_else(|| {
        LifecycleError::NotFound {
            entity: "Appointment".into(),
            id: token.to_string(),
        }
    })?;
    if appt.status.is_terminal() {
        return Err(LifecycleError::Conflict { token: *token });
    }
    Ok(appt)
}

// ─── Read surface ─────────────────────────────────────────────────────────────

pub fn list_pending(conn: &Connection) -> Result<Vec<AppointmentSummary>, LifecycleError> {
    Ok(repository::list_pending(conn)?)
}

pub fn list_for_patient(
    conn: &Connection,
    patient: PatientId,
) -> Result<Vec<AppointmentSummary>, LifecycleError> {
    Ok(repository::list_for_patient(conn, patient)?)
}

pub fn list_approved(
    conn: &Connection,
    doctor_name: &str,
    date: NaiveDate,
) -> Result<Vec<AppointmentSummary>, LifecycleError> {
    Ok(repository::list_approved(conn, doctor_name, date)?)
}

pub fn notifications_for(
    conn: &Connection,
    channel: NotificationChannel,
    recipient_key: &str,
) -> Result<Vec<Notification>, LifecycleError> {
    Ok(repository::list_notices(conn, channel, recipient_key)?)
}
