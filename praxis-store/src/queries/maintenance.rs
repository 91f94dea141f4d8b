//! Whole-store maintenance: the logout/reset wipe.

use rusqlite::Connection;

use praxis_core::errors::PraxisResult;

use crate::to_storage_err;

use super::collection_ops::in_transaction;

/// Delete every row in every table. Used on logout/reset; the schema stays.
pub fn wipe_all(conn: &Connection) -> PraxisResult<()> {
    in_transaction(conn, "wipe_all", |tx| {
        tx.execute_batch(
            "
            DELETE FROM records;
            DELETE FROM exam_results;
            DELETE FROM student_kv;
            ",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(())
    })
}
