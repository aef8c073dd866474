//! SQLite-backed planet store implementation.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use super::{Planet, PlanetError, PlanetStore};

/// SQLite-backed planet store.
pub struct SqlitePlanetStore {
    conn: Mutex<Connection>,
}

impl SqlitePlanetStore {
    /// Create a new SQLite planet store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, PlanetError> {
        let conn = Connection::open(path).map_err(|e| PlanetError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite planet store (useful for testing).
    pub fn in_memory() -> Result<Self, PlanetError> {
        let conn =
            Connection::open_in_memory().map_err(|e| PlanetError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), PlanetError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS planets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kepler_name TEXT NOT NULL UNIQUE
            );
            "#,
        )
        .map_err(|e| PlanetError::Database(e.to_string()))?;

        Ok(())
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, PlanetError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| PlanetError::Database("connection lock poisoned".to_string()))?;
        f(&conn).map_err(|e| PlanetError::Database(e.to_string()))
    }
}

impl PlanetStore for SqlitePlanetStore {
    fn find_by_name(&self, kepler_name: &str) -> Result<Option<Planet>, PlanetError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT kepler_name FROM planets WHERE kepler_name = ?",
                params![kepler_name],
                |row| {
                    Ok(Planet {
                        kepler_name: row.get(0)?,
                    })
                },
            )
            .optional()
        })
    }

    fn upsert(&self, kepler_name: &str) -> Result<bool, PlanetError> {
        let inserted = self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO planets (kepler_name) VALUES (?)",
                params![kepler_name],
            )
        })?;
        Ok(inserted == 1)
    }

    fn list(&self) -> Result<Vec<Planet>, PlanetError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT kepler_name FROM planets ORDER BY kepler_name")?;
            let rows = stmt.query_map([], |row| {
                Ok(Planet {
                    kepler_name: row.get(0)?,
                })
            })?;

            let mut planets = Vec::new();
            for row in rows {
                planets.push(row?);
            }
            Ok(planets)
        })
    }
}
