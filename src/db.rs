use crate::config::Config;
use anyhow::Result;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::path::Path;
use std::time::Duration;

/// How long a local connection waits on a locked database file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Process-wide handle to the store. Holds connection settings only;
/// every request acquires its own connection through [`Database::connect`].
pub struct Database {
    db: LibsqlDatabase,
    local: bool,
}

impl Database {
    pub async fn new(cfg: &Config, data_dir: &Path) -> Result<Self> {
        match cfg.app.remote() {
            Some((url, token)) => {
                tracing::info!(url, "[db] running against remote database");
                let db = Builder::new_remote(url.to_string(), token.to_string())
                    .build()
                    .await?;
                Self::bootstrap(Database { db, local: false }).await
            }
            None => {
                let path = data_dir.join(cfg.app.get_db());
                tracing::info!(path = ?path, "[db] running against local database");
                Self::open_local(&path).await
            }
        }
    }

    pub async fn open_local(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new_local(path.as_ref()).build().await?;
        Self::bootstrap(Database { db, local: true }).await
    }

    async fn bootstrap(database: Database) -> Result<Self> {
        let conn = database.connect()?;
        conn.query("SELECT 1", ()).await?;

        if database.local {
            // readers keep going while a writer holds the file
            conn.execute_batch("PRAGMA journal_mode=WAL;").await?;
        }

        conn.execute_batch(crate::books::schema())
            .await
            .map_err(|e| anyhow::anyhow!("failed to create books table: {e}"))?;

        Ok(database)
    }

    pub fn connect(&self) -> Result<Connection, libsql::Error> {
        let conn = self.db.connect()?;
        if self.local {
            conn.busy_timeout(BUSY_TIMEOUT)?;
        }
        Ok(conn)
    }
}
