//! Caller identity types.
//!
//! Patients and admins are disjoint user classes authenticated through
//! separate account tables. The authentication provider (out of scope
//! here) resolves a request to a [`Caller`]; lifecycle operations take
//! the resolved identity as an explicit argument and never read it from
//! ambient state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a registered patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub i64);

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminId(pub i64);

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved caller, as produced by the authentication provider.
/// The core trusts this without re-verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Caller {
    Patient(PatientId),
    Admin(AdminId),
    Anonymous,
}

impl Caller {
    pub fn patient(self) -> Option<PatientId> {
        match self {
            Self::Patient(id) => Some(id),
            _ => None,
        }
    }

    pub fn admin(self) -> Option<AdminId> {
        match self {
            Self::Admin(id) => Some(id),
            _ => None,
        }
    }
}
