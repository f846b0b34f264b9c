use serde::{Deserialize, Serialize};

use crate::identity::{AdminId, PatientId};

/// A registered patient account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// A registered administrator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: AdminId,
    pub name: String,
    pub email: String,
}
