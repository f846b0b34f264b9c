use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(AppointmentStatus {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    Cancelled => "cancelled",
});

impl AppointmentStatus {
    /// Whether any further transition is allowed from this status.
    /// `pending` is the only non-terminal status; there is no re-open.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

str_enum!(NotificationChannel {
    Patient => "patient",
    Admin => "admin",
});

impl NotificationChannel {
    /// Backing table for the channel. The two logs are independent;
    /// patient notices are keyed by appointment token, admin notices
    /// by the submitting patient's id.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Patient => "notifications",
            Self::Admin => "adminnotify",
        }
    }
}
