//! Per-student key-value blobs: the active exam snapshot and UI prefs.
//!
//! Simple last-write-wins cells outside the collection contract.

use chrono::Utc;
use rusqlite::{params, Connection};
use serde_json::Value;

use praxis_core::errors::PraxisResult;

use crate::to_storage_err;

pub fn kv_get(conn: &Connection, student_id: &str, key: &str) -> PraxisResult<Option<Value>> {
    let mut stmt = conn
        .prepare("SELECT value FROM student_kv WHERE student_id = ?1 AND key = ?2")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let raw: Option<String> = stmt
        .query_row(params![student_id, key], |row| row.get(0))
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(to_storage_err(other.to_string())),
        })?;
    raw.map(|s| serde_json::from_str(&s).map_err(Into::into))
        .transpose()
}

pub fn kv_put(conn: &Connection, student_id: &str, key: &str, value: &Value) -> PraxisResult<()> {
    let raw = serde_json::to_string(value)?;
    conn.execute(
        "INSERT INTO student_kv (student_id, key, value, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (student_id, key)
         DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![student_id, key, raw, Utc::now().to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn kv_delete(conn: &Connection, student_id: &str, key: &str) -> PraxisResult<()> {
    conn.execute(
        "DELETE FROM student_kv WHERE student_id = ?1 AND key = ?2",
        params![student_id, key],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
