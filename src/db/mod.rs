use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;

mod schema;
mod settings;

pub use schema::SCHEMA_VERSION;
pub use settings::{SETTING_BACKEND_URL, SETTING_SESSION_TOKEN, SETTING_SESSION_USER, SETTING_TIMEOUT_SECS};

/// Local client storage: settings and the signed-in session.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database, creating if needed, running migrations
    pub fn open() -> Result<Self> {
        let path = Self::default_path()?;
        Self::open_at(path)
    }

    pub fn open_at(path: PathBuf) -> Result<Self> {
        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        let db = Self { conn };
        db.migrate()?;
        tracing::debug!("opened local storage at {}", path.display());
        Ok(db)
    }

    /// Open in-memory database for testing
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn default_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("profilecmd").join("profilecmd.db"))
    }

    /// Apply every step newer than the stored version, one transaction each.
    fn migrate(&self) -> Result<()> {
        let current = self.get_schema_version()?;
        if current > SCHEMA_VERSION {
            return Err(anyhow::anyhow!(
                "Local storage is at schema version {}, newer than this build supports ({})",
                current,
                SCHEMA_VERSION
            ));
        }

        for &(version, sql) in schema::MIGRATIONS.iter().filter(|(v, _)| *v > current) {
            let tx = self.conn.unchecked_transaction()?;
            tx.execute_batch(sql)?;
            record_version(&tx, version)?;
            tx.commit()?;
            tracing::debug!("migrated local storage to schema version {}", version);
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<i32> {
        let result: Result<i32, _> =
            self.conn
                .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                    row.get(0)
                });

        match result {
            Ok(v) => Ok(v),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(rusqlite::Error::SqliteFailure(err, msg)) => {
                // "no such table" is error code 1 (SQLITE_ERROR)
                if err.code == rusqlite::ErrorCode::Unknown
                    && msg.as_ref().map_or(false, |m| m.contains("no such table"))
                {
                    Ok(0)
                } else {
                    Err(rusqlite::Error::SqliteFailure(err, msg).into())
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn record_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?)",
        [version],
    )?;
    Ok(())
}
