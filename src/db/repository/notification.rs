use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{Notification, NotificationChannel};

/// Append a notice to the given channel's log. Insertion order is the
/// only ordering the sink guarantees; there is no update or delete.
pub fn append_notice(
    conn: &Connection,
    channel: NotificationChannel,
    recipient_key: &str,
    message: &str,
) -> Result<(), DatabaseError> {
    let now = chrono::Local::now().naive_local();
    // Table name comes from the channel enum, never from the caller;
    // recipient and message are always bound as parameters.
    let sql = format!(
        "INSERT INTO {} (recipient_key, message, created_at) VALUES (?1, ?2, ?3)",
        channel.table()
    );
    conn.execute(
        &sql,
        params![recipient_key, message, now.format("%Y-%m-%d %H:%M:%S").to_string()],
    )?;
    Ok(())
}

/// List all notices for a recipient on one channel, oldest first.
pub fn list_notices(
    conn: &Connection,
    channel: NotificationChannel,
    recipient_key: &str,
) -> Result<Vec<Notification>, DatabaseError> {
    let sql = format!(
        "SELECT recipient_key, message, created_at FROM {} WHERE recipient_key = ?1 ORDER BY id",
        channel.table()
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map(params![recipient_key], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for row in rows {
        let (recipient_key, message, created_at) = row?;
        out.push(Notification {
            recipient_key,
            message,
            created_at: NaiveDateTime::parse_from_str(&created_at, "%Y-%m-%d %H:%M:%S")
                .unwrap_or_default(),
        });
    }
    Ok(out)
}
