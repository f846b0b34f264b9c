use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One entry in a notification channel. Append-only; composed by the
/// lifecycle manager for system notices, never edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub recipient_key: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}
