//! Schema of the `kv_records` table.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`; step `n` of
//!   `SCHEMA_STEPS` moves a database from version `n` to `n + 1`.
//! - A database written by a newer build is refused, never downgraded.
//! - Pending steps run in one transaction, so a failed upgrade leaves the
//!   previous version intact.

use super::{StorageError, StorageResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

const SCHEMA_STEPS: &[&str] = &[include_str!("sql/0001_kv_records.sql")];

/// Record schema version written by this build.
pub fn schema_version() -> u32 {
    SCHEMA_STEPS.len() as u32
}

/// Brings `conn` up to `schema_version()`.
pub(super) fn upgrade(conn: &mut Connection) -> StorageResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let supported = schema_version();
    if found > supported {
        return Err(StorageError::SchemaTooNew { found, supported });
    }
    if found == supported {
        return Ok(());
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    for (step, sql) in SCHEMA_STEPS.iter().enumerate().skip(found as usize) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", step as u32 + 1)?;
    }
    tx.commit()?;

    info!(
        "event=storage_upgrade module=storage status=ok from_version={found} to_version={supported}"
    );
    Ok(())
}
