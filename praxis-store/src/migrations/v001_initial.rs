//! v001: records (the four collections), exam_results, student_kv.

use rusqlite::Connection;

use praxis_core::errors::PraxisResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> PraxisResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS records (
            collection  TEXT NOT NULL,
            key         TEXT NOT NULL,
            payload     TEXT NOT NULL,
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (collection, key)
        );

        CREATE INDEX IF NOT EXISTS idx_records_bank
            ON records (json_extract(payload, '$.bank_id'))
            WHERE collection = 'questions';

        CREATE TABLE IF NOT EXISTS exam_results (
            id           TEXT PRIMARY KEY,
            student_id   TEXT NOT NULL,
            schedule_id  TEXT NOT NULL,
            payload      TEXT NOT NULL,
            time_expired INTEGER NOT NULL DEFAULT 0,
            synced       INTEGER NOT NULL DEFAULT 0,
            finished_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_results_unsynced
            ON exam_results (student_id, synced);

        CREATE TABLE IF NOT EXISTS student_kv (
            student_id  TEXT NOT NULL,
            key         TEXT NOT NULL,
            value       TEXT NOT NULL,
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (student_id, key)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
