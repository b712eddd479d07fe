//! Schema migrations for the notes database.
//!
//! # Responsibility
//! - Keep the ordered list of schema steps and their data seeds.
//! - Bring a connection up to `latest_version()` in one transaction.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - The applied version is mirrored to `PRAGMA user_version`.
//! - Palette rows come from `model::color::palette()`, never from SQL literals.

use crate::db::{schema_version, DbError, DbResult};
use crate::model::color::palette;
use log::info;
use rusqlite::{params, Connection, Transaction};

type SeedFn = fn(&Transaction<'_>) -> DbResult<usize>;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
    seed: Option<SeedFn>,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "init_notes_and_colors",
    sql: include_str!("0001_init.sql"),
    seed: Some(seed_palette),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let latest = latest_version();
    if from > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }
    if from == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|migration| migration.version > from) {
        tx.execute_batch(migration.sql)?;
        let seeded = match migration.seed {
            Some(seed) => seed(&tx)?,
            None => 0,
        };
        tx.pragma_update(None, "user_version", migration.version)?;
        info!(
            "event=db_migrate module=db status=applied version={} name={} seeded_rows={seeded}",
            migration.version, migration.name
        );
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={latest}");
    Ok(())
}

fn seed_palette(tx: &Transaction<'_>) -> DbResult<usize> {
    let mut stmt = tx.prepare("INSERT OR IGNORE INTO colors (id, name, hex) VALUES (?1, ?2, ?3);")?;
    let mut inserted = 0;
    for color in palette() {
        inserted += stmt.execute(params![color.id, color.name, color.hex])?;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version};
    use crate::db::{ensure_schema, schema_version, DbError};
    use crate::model::color::palette;
    use rusqlite::Connection;

    #[test]
    fn fresh_connection_is_migrated_and_seeded_once() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            ensure_schema(&conn),
            Err(DbError::MissingTable("notes"))
        ));

        apply_migrations(&mut conn).unwrap();
        apply_migrations(&mut conn).unwrap();

        assert_eq!(schema_version(&conn).unwrap(), latest_version());
        ensure_schema(&conn).unwrap();
        let count: usize = conn
            .query_row("SELECT COUNT(*) FROM colors;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, palette().len());
    }
}
