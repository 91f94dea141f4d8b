//! Get, put, delete, batch and replace ops over the `records` table.

use chrono::Utc;
use rusqlite::{params, Connection};
use serde_json::Value;

use praxis_core::errors::{PraxisResult, StorageError};
use praxis_core::traits::Collection;

use crate::to_storage_err;

/// Fetch one record's payload.
pub fn get(conn: &Connection, collection: Collection, key: &str) -> PraxisResult<Option<Value>> {
    let mut stmt = conn
        .prepare("SELECT payload FROM records WHERE collection = ?1 AND key = ?2")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let raw: Option<String> = stmt
        .query_row(params![collection.as_str(), key], |row| row.get(0))
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(to_storage_err(other.to_string())),
        })?;
    raw.map(|s| serde_json::from_str(&s).map_err(Into::into))
        .transpose()
}

/// Upsert one record. Last write wins.
pub fn put(conn: &Connection, collection: Collection, key: &str, value: &Value) -> PraxisResult<()> {
    let payload = serde_json::to_string(value)?;
    conn.execute(
        "INSERT INTO records (collection, key, payload, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (collection, key)
         DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at",
        params![collection.as_str(), key, payload, Utc::now().to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Delete one record. Deleting a missing key is a no-op.
pub fn delete(conn: &Connection, collection: Collection, key: &str) -> PraxisResult<()> {
    conn.execute(
        "DELETE FROM records WHERE collection = ?1 AND key = ?2",
        params![collection.as_str(), key],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Fetch every record of a collection as `(key, payload)` pairs.
pub fn get_all(conn: &Connection, collection: Collection) -> PraxisResult<Vec<(String, Value)>> {
    let mut stmt = conn
        .prepare("SELECT key, payload FROM records WHERE collection = ?1 ORDER BY key")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![collection.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (key, raw) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push((key, serde_json::from_str(&raw)?));
    }
    Ok(out)
}

/// Upsert all rows in one transaction. All-or-nothing.
pub fn put_all(
    conn: &Connection,
    collection: Collection,
    rows: &[(String, Value)],
) -> PraxisResult<usize> {
    in_transaction(conn, "put_all", |tx| {
        for (key, value) in rows {
            put(tx, collection, key, value)?;
        }
        Ok(rows.len())
    })
}

/// Clear the collection then bulk-insert `rows`, in one transaction.
pub fn replace_all(
    conn: &Connection,
    collection: Collection,
    rows: &[(String, Value)],
) -> PraxisResult<usize> {
    in_transaction(conn, "replace_all", |tx| {
        tx.execute(
            "DELETE FROM records WHERE collection = ?1",
            params![collection.as_str()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        for (key, value) in rows {
            put(tx, collection, key, value)?;
        }
        Ok(rows.len())
    })
}

/// Clear the given collections in one transaction.
pub fn clear(conn: &Connection, collections: &[Collection]) -> PraxisResult<()> {
    in_transaction(conn, "clear", |tx| {
        for collection in collections {
            tx.execute(
                "DELETE FROM records WHERE collection = ?1",
                params![collection.as_str()],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        }
        Ok(())
    })
}

/// Whether any cached question belongs to `bank_id`.
pub fn has_bank(conn: &Connection, bank_id: &str) -> PraxisResult<bool> {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM records
                WHERE collection = 'questions'
                  AND json_extract(payload, '$.bank_id') = ?1
            )",
            params![bank_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(exists != 0)
}

/// Replace all cached questions of one bank in a single transaction.
/// Questions of other banks are untouched.
pub fn replace_bank(
    conn: &Connection,
    bank_id: &str,
    rows: &[(String, Value)],
) -> PraxisResult<usize> {
    in_transaction(conn, "replace_bank", |tx| {
        tx.execute(
            "DELETE FROM records
             WHERE collection = 'questions'
               AND json_extract(payload, '$.bank_id') = ?1",
            params![bank_id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        for (key, value) in rows {
            put(tx, Collection::Questions, key, value)?;
        }
        Ok(rows.len())
    })
}

/// Run `f` inside an explicit transaction; commit on Ok, roll back on Err.
pub(crate) fn in_transaction<F, T>(conn: &Connection, op: &str, f: F) -> PraxisResult<T>
where
    F: FnOnce(&Connection) -> PraxisResult<T>,
{
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("{op} begin: {e}")))?;

    match f(&tx) {
        Ok(value) => {
            tx.commit().map_err(|e| StorageError::CommitFailed {
                reason: format!("{op}: {e}"),
            })?;
            Ok(value)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}
