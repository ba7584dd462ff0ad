pub mod config;
#[cfg(feature = "http_api")]
pub mod http_api;
#[cfg(any(feature = "cli", feature = "http_api"))]
pub mod logging;
pub mod model;
pub mod persistence;
pub mod snapshot;
pub mod store;

pub use config::{AppConfig, Backend, ConfigError};
pub use model::{Feedback, Game, GameId, Referee};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteTableStore;
pub use persistence::{
    JsonDirectoryStore, MemoryStore, PersistenceError, PersistenceResult, TableStore, Tables,
    export_feedback_csv, export_games_csv, export_referees_csv,
};
pub use store::{NotFound, OperationOutcome, RecordStore, StoreError, StoreResult};
