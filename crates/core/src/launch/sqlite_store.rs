//! SQLite-backed launch store implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, ToSql};

use super::{LaunchError, LaunchFilter, LaunchRecord, LaunchStore, LaunchUpdate, NewLaunch};

/// Columns that make up a [`LaunchRecord`]. `id` and `version` are internal.
const LAUNCH_COLUMNS: &str =
    "flight_number, mission, rocket, launch_date, target, customers, upcoming, success";

/// SQLite-backed launch store.
pub struct SqliteLaunchStore {
    conn: Mutex<Connection>,
}

impl SqliteLaunchStore {
    /// Create a new SQLite launch store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, LaunchError> {
        let conn = Connection::open(path).map_err(db_err)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite launch store (useful for testing).
    pub fn in_memory() -> Result<Self, LaunchError> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), LaunchError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS launches (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                flight_number INTEGER NOT NULL UNIQUE,
                mission TEXT NOT NULL,
                rocket TEXT NOT NULL,
                launch_date TEXT NOT NULL,
                target TEXT,
                customers TEXT NOT NULL DEFAULT '[]',
                upcoming INTEGER NOT NULL,
                success INTEGER NOT NULL DEFAULT 1,
                version INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_launches_mission ON launches(mission);
            "#,
        )
        .map_err(db_err)?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, LaunchError> {
        self.conn
            .lock()
            .map_err(|_| LaunchError::Database("connection lock poisoned".to_string()))
    }

    fn build_where_clause(
        filter: &LaunchFilter,
    ) -> Result<(String, Vec<Box<dyn ToSql>>), LaunchError> {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(flight_number) = filter.flight_number {
            conditions.push("flight_number = ?");
            params.push(Box::new(flight_number));
        }
        if let Some(ref mission) = filter.mission {
            conditions.push("mission = ?");
            params.push(Box::new(mission.clone()));
        }
        if let Some(ref rocket) = filter.rocket {
            conditions.push("rocket = ?");
            params.push(Box::new(rocket.clone()));
        }
        if let Some(launch_date) = filter.launch_date {
            conditions.push("launch_date = ?");
            params.push(Box::new(launch_date.to_rfc3339()));
        }
        if let Some(ref target) = filter.target {
            conditions.push("target = ?");
            params.push(Box::new(target.clone()));
        }
        if let Some(ref customers) = filter.customers {
            // Stored as a JSON array, so equality means same names in same order
            conditions.push("customers = ?");
            params.push(Box::new(encode_customers(customers)?));
        }
        if let Some(upcoming) = filter.upcoming {
            conditions.push("upcoming = ?");
            params.push(Box::new(upcoming));
        }
        if let Some(success) = filter.success {
            conditions.push("success = ?");
            params.push(Box::new(success));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        Ok((where_clause, params))
    }

    fn row_to_launch(row: &rusqlite::Row) -> rusqlite::Result<LaunchRecord> {
        let launch_date_str: String = row.get(3)?;
        let launch_date = DateTime::parse_from_rfc3339(&launch_date_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        let customers_json: String = row.get(5)?;
        let customers: Vec<String> = serde_json::from_str(&customers_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

        Ok(LaunchRecord {
            flight_number: row.get(0)?,
            mission: row.get(1)?,
            rocket: row.get(2)?,
            launch_date,
            target: row.get(4)?,
            customers,
            upcoming: row.get(6)?,
            success: row.get(7)?,
        })
    }
}

fn db_err(e: rusqlite::Error) -> LaunchError {
    LaunchError::Database(e.to_string())
}

fn encode_customers(customers: &[String]) -> Result<String, LaunchError> {
    serde_json::to_string(customers).map_err(|e| LaunchError::Serialization(e.to_string()))
}

impl LaunchStore for SqliteLaunchStore {
    fn find_one(&self, filter: &LaunchFilter) -> Result<Option<LaunchRecord>, LaunchError> {
        let conn = self.conn()?;
        let (where_clause, params) = Self::build_where_clause(filter)?;

        let sql = format!(
            "SELECT {} FROM launches {} ORDER BY flight_number ASC LIMIT 1",
            LAUNCH_COLUMNS, where_clause
        );
        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();

        conn.query_row(&sql, param_refs.as_slice(), Self::row_to_launch)
            .optional()
            .map_err(db_err)
    }

    fn find_latest_by_flight_number(&self) -> Result<Option<LaunchRecord>, LaunchError> {
        let conn = self.conn()?;

        let sql = format!(
            "SELECT {} FROM launches ORDER BY flight_number DESC LIMIT 1",
            LAUNCH_COLUMNS
        );

        conn.query_row(&sql, [], Self::row_to_launch)
            .optional()
            .map_err(db_err)
    }

    fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<LaunchRecord>, LaunchError> {
        let conn = self.conn()?;

        // SQLite treats a negative LIMIT as "no limit".
        let limit: i64 = if limit == 0 {
            -1
        } else {
            i64::try_from(limit).unwrap_or(i64::MAX)
        };
        let offset = i64::try_from(skip).unwrap_or(i64::MAX);

        let sql = format!(
            "SELECT {} FROM launches ORDER BY flight_number ASC LIMIT ?1 OFFSET ?2",
            LAUNCH_COLUMNS
        );
        let mut stmt = conn.prepare(&sql).map_err(db_err)?;
        let rows = stmt
            .query_map(params![limit, offset], Self::row_to_launch)
            .map_err(db_err)?;

        let mut launches = Vec::new();
        for row in rows {
            launches.push(row.map_err(db_err)?);
        }
        Ok(launches)
    }

    fn upsert_by_flight_number(&self, launch: &LaunchRecord) -> Result<(), LaunchError> {
        let customers = encode_customers(&launch.customers)?;
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO launches (flight_number, mission, rocket, launch_date, target, customers, upcoming, success)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(flight_number) DO UPDATE SET
                mission = excluded.mission,
                rocket = excluded.rocket,
                launch_date = excluded.launch_date,
                target = excluded.target,
                customers = excluded.customers,
                upcoming = excluded.upcoming,
                success = excluded.success,
                version = launches.version + 1",
            params![
                launch.flight_number,
                &launch.mission,
                &launch.rocket,
                launch.launch_date.to_rfc3339(),
                &launch.target,
                customers,
                launch.upcoming,
                launch.success,
            ],
        )
        .map_err(db_err)?;

        Ok(())
    }

    fn update_fields_by_flight_number(
        &self,
        flight_number: i64,
        update: &LaunchUpdate,
    ) -> Result<usize, LaunchError> {
        if update.is_empty() {
            return Ok(0);
        }

        let mut assignments = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(ref mission) = update.mission {
            assignments.push("mission = ?");
            values.push(Box::new(mission.clone()));
        }
        if let Some(ref rocket) = update.rocket {
            assignments.push("rocket = ?");
            values.push(Box::new(rocket.clone()));
        }
        if let Some(launch_date) = update.launch_date {
            assignments.push("launch_date = ?");
            values.push(Box::new(launch_date.to_rfc3339()));
        }
        if let Some(ref target) = update.target {
            assignments.push("target = ?");
            values.push(Box::new(target.clone()));
        }
        if let Some(ref customers) = update.customers {
            assignments.push("customers = ?");
            values.push(Box::new(encode_customers(customers)?));
        }
        if let Some(upcoming) = update.upcoming {
            assignments.push("upcoming = ?");
            values.push(Box::new(upcoming));
        }
        if let Some(success) = update.success {
            assignments.push("success = ?");
            values.push(Box::new(success));
        }
        assignments.push("version = version + 1");
        values.push(Box::new(flight_number));

        let sql = format!(
            "UPDATE launches SET {} WHERE flight_number = ?",
            assignments.join(", ")
        );
        let value_refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();

        let conn = self.conn()?;
        conn.execute(&sql, value_refs.as_slice()).map_err(db_err)
    }

    fn insert_with_next_flight_number(
        &self,
        launch: &NewLaunch,
        default_latest: i64,
    ) -> Result<LaunchRecord, LaunchError> {
        let customers = encode_customers(&launch.customers)?;
        let conn = self.conn()?;
        let tx = conn.unchecked_transaction().map_err(db_err)?;

        let latest: Option<i64> = tx
            .query_row("SELECT MAX(flight_number) FROM launches", [], |row| {
                row.get(0)
            })
            .map_err(db_err)?;
        let flight_number = latest
            .unwrap_or(default_latest)
            .checked_add(1)
            .ok_or_else(|| LaunchError::Database("flight numbers exhausted".to_string()))?;

        tx.execute(
            "INSERT INTO launches (flight_number, mission, rocket, launch_date, target, customers, upcoming, success)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                flight_number,
                &launch.mission,
                &launch.rocket,
                launch.launch_date.to_rfc3339(),
                &launch.target,
                customers,
                launch.upcoming,
                launch.success,
            ],
        )
        .map_err(db_err)?;
        tx.commit().map_err(db_err)?;

        Ok(launch.clone().into_record(flight_number))
    }

    fn count(&self) -> Result<u64, LaunchError> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM launches", [], |row| row.get(0))
            .map_err(db_err)?;
        Ok(count as u64)
    }
}
