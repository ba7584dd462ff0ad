//! Runtime configuration read from the environment.

use crate::persistence::{JsonDirectoryStore, PersistenceResult, TableStore};
use crate::store::RecordStore;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DATA_DIR_VAR: &str = "REFEREE_SCHEDULER_DATA_DIR";
pub const BACKEND_VAR: &str = "REFEREE_SCHEDULER_BACKEND";
pub const HTTP_ADDR_VAR: &str = "REFEREE_SCHEDULER_HTTP_ADDR";

pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:3000";
pub const SQLITE_FILE: &str = "referee_scheduler.sqlite";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Json,
    #[cfg(feature = "sqlite")]
    Sqlite,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Json => "json",
            #[cfg(feature = "sqlite")]
            Backend::Sqlite => "sqlite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Backend::Json),
            #[cfg(feature = "sqlite")]
            "sqlite" => Ok(Backend::Sqlite),
            other => Err(ConfigError::new(format!(
                "unknown storage backend '{other}' (set {BACKEND_VAR} to json or sqlite)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub backend: Backend,
    pub http_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            backend: Backend::default(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup(BACKEND_VAR).filter(|v| !v.trim().is_empty()) {
            config.backend = backend.parse()?;
        }
        if let Some(addr) = lookup(HTTP_ADDR_VAR).filter(|v| !v.trim().is_empty()) {
            config.http_addr = addr;
        }
        Ok(config)
    }

    pub fn table_store(&self) -> PersistenceResult<Box<dyn TableStore>> {
        match self.backend {
            Backend::Json => Ok(Box::new(JsonDirectoryStore::new(&self.data_dir)?)),
            #[cfg(feature = "sqlite")]
            Backend::Sqlite => {
                std::fs::create_dir_all(&self.data_dir)?;
                let path = self.data_dir.join(SQLITE_FILE);
                Ok(Box::new(crate::persistence::sqlite::SqliteTableStore::new(path)?))
            }
        }
    }

    pub fn open_store(&self) -> PersistenceResult<RecordStore> {
        RecordStore::open(self.table_store()?)
    }
}
