//! Exam result rows: insert, fetch, unsynced queue, monotonic synced flip.

use rusqlite::{params, Connection};

use praxis_core::errors::PraxisResult;
use praxis_core::models::ExamResult;

use crate::to_storage_err;

use super::collection_ops::in_transaction;

/// Insert a result. A result row is immutable once written: re-inserting an
/// existing id is a no-op, which is what makes `finish` idempotent at the
/// storage layer.
pub fn insert_result(conn: &Connection, result: &ExamResult) -> PraxisResult<()> {
    let payload = serde_json::to_string(result)?;
    conn.execute(
        "INSERT OR IGNORE INTO exam_results
            (id, student_id, schedule_id, payload, time_expired, synced, finished_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            result.id,
            result.student_id,
            result.schedule_id,
            payload,
            result.time_expired as i32,
            result.synced as i32,
            result.finished_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Fetch one result by attempt id.
pub fn get_result(conn: &Connection, id: &str) -> PraxisResult<Option<ExamResult>> {
    let mut stmt = conn
        .prepare("SELECT payload, synced FROM exam_results WHERE id = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let row: Option<(String, i64)> = stmt
        .query_row(params![id], |row| Ok((row.get(0)?, row.get(1)?)))
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(to_storage_err(other.to_string())),
        })?;

    row.map(|(raw, synced)| hydrate(&raw, synced)).transpose()
}

/// The unsynced queue for one student, oldest first.
pub fn unsynced_results(conn: &Connection, student_id: &str) -> PraxisResult<Vec<ExamResult>> {
    let mut stmt = conn
        .prepare(
            "SELECT payload, synced FROM exam_results
             WHERE student_id = ?1 AND synced = 0
             ORDER BY finished_at",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![student_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (raw, synced) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(hydrate(&raw, synced)?);
    }
    Ok(out)
}

/// Flip `synced` to true for the given ids, atomically. Monotonic: already
/// synced rows are untouched. Returns the number of rows flipped.
pub fn mark_synced(conn: &Connection, ids: &[String]) -> PraxisResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }
    in_transaction(conn, "mark_synced", |tx| {
        let mut flipped = 0;
        for id in ids {
            flipped += tx
                .execute(
                    "UPDATE exam_results SET synced = 1 WHERE id = ?1 AND synced = 0",
                    params![id],
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
        }
        Ok(flipped)
    })
}

/// Deserialize a stored result; the `synced` column is authoritative over
/// whatever the payload snapshot says.
fn hydrate(raw: &str, synced: i64) -> PraxisResult<ExamResult> {
    let mut result: ExamResult = serde_json::from_str(raw)?;
    result.synced = synced != 0;
    Ok(result)
}
