use crate::model::{Feedback, Game, Referee};
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    Csv(csv::Error),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// The three record tables, each in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub referees: Vec<Referee>,
    pub games: Vec<Game>,
    pub feedback: Vec<Feedback>,
}

/// Backing storage for a [`crate::RecordStore`].
///
/// `save_tables` rewrites every table in full. Implementations are not
/// required to make the three writes atomic with respect to each other.
pub trait TableStore: Send + Sync {
    fn load_tables(&self) -> PersistenceResult<Tables>;
    fn save_tables(&self, tables: &Tables) -> PersistenceResult<()>;
    fn describe(&self) -> String;
}

/// Loads empty tables and discards saves.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryStore;

impl TableStore for MemoryStore {
    fn load_tables(&self) -> PersistenceResult<Tables> {
        Ok(Tables::default())
    }

    fn save_tables(&self, _tables: &Tables) -> PersistenceResult<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{JsonDirectoryStore, export_feedback_csv, export_games_csv, export_referees_csv};
