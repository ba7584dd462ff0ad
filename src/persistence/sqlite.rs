use super::{PersistenceError, PersistenceResult, TableStore, Tables};
use serde::Serialize;
use serde::de::DeserializeOwned;
use rusqlite::{Connection, Transaction, params};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const TABLE_NAMES: [&str; 3] = ["referees", "games", "feedback"];

/// Each table stored as ordered rows of JSON records in one SQLite file.
pub struct SqliteTableStore {
    connection: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteTableStore {
    pub fn new<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path.as_ref())?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
            path: path.as_ref().to_path_buf(),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS referees (
                position INTEGER PRIMARY KEY,
                record_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS games (
                position INTEGER PRIMARY KEY,
                record_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS feedback (
                position INTEGER PRIMARY KEY,
                record_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn lock(&self) -> PersistenceResult<std::sync::MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| PersistenceError::InvalidData("sqlite connection mutex poisoned".into()))
    }
}

fn save_rows<T: Serialize>(tx: &Transaction, table: &str, rows: &[T]) -> PersistenceResult<()> {
    debug_assert!(TABLE_NAMES.contains(&table));
    tx.execute(&format!("DELETE FROM {table}"), [])?;
    let mut stmt = tx.prepare(&format!(
        "INSERT INTO {table} (position, record_json) VALUES (?1, ?2)"
    ))?;
    for (position, row) in rows.iter().enumerate() {
        let json = serde_json::to_string(row)?;
        stmt.execute(params![position as i64, json])?;
    }
    Ok(())
}

fn load_rows<T: DeserializeOwned>(conn: &Connection, table: &str) -> PersistenceResult<Vec<T>> {
    debug_assert!(TABLE_NAMES.contains(&table));
    let mut stmt = conn.prepare(&format!(
        "SELECT record_json FROM {table} ORDER BY position ASC"
    ))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut records = Vec::new();
    for json in rows {
        let json = json?;
        records.push(serde_json::from_str(&json)?);
    }
    Ok(records)
}

impl TableStore for SqliteTableStore {
    fn load_tables(&self) -> PersistenceResult<Tables> {
        let conn = self.lock()?;
        Ok(Tables {
            referees: load_rows(&conn, "referees")?,
            games: load_rows(&conn, "games")?,
            feedback: load_rows(&conn, "feedback")?,
        })
    }

    fn save_tables(&self, tables: &Tables) -> PersistenceResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        save_rows(&tx, "referees", &tables.referees)?;
        save_rows(&tx, "games", &tables.games)?;
        save_rows(&tx, "feedback", &tables.feedback)?;
        tx.commit()?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite database {}", self.path.display())
    }
}
