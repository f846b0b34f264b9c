use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AppointmentStatus;
use crate::identity::PatientId;

/// A stored appointment. The `token` is the only external handle;
/// the integer row id never leaves the repository layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub token: Uuid,
    pub patient_id: PatientId,
    pub doctor_name: String,
    pub requested_date: NaiveDate,
    pub phone: String,
    pub email: String,
    pub message: String,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
}

/// Caller-supplied booking details. Contact fields are a denormalized
/// copy taken as given; they are not re-checked against the patient row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub doctor_name: String,
    pub requested_date: String, // YYYY-MM-DD
    pub phone: String,
    pub email: String,
    pub message: String,
}

/// Row shape for the patient and admin list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSummary {
    pub token: Uuid,
    pub patient_id: PatientId,
    pub doctor_name: String,
    pub requested_date: NaiveDate,
    pub status: AppointmentStatus,
}
