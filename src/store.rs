use crate::model::{Feedback, Game, GameId, Referee};
use crate::persistence::{MemoryStore, PersistenceError, PersistenceResult, TableStore, Tables};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

pub const REFEREE_ADDED: &str = "Referee added successfully.";
pub const GAME_ADDED: &str = "Game added successfully.";
pub const REFEREE_ASSIGNED: &str = "Referee assigned successfully";
pub const FEEDBACK_ADDED: &str = "Feedback added successfully.";
pub const REFEREE_REMOVED: &str = "Referee removed successfully.";
pub const GAME_REMOVED: &str = "Game removed successfully.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFound {
    /// Assignment needs both the referee and the game.
    RefereeOrGame,
    /// Feedback needs both the referee and the game.
    FeedbackTarget,
    Referee,
    Game,
}

impl NotFound {
    pub fn message(&self) -> &'static str {
        match self {
            NotFound::RefereeOrGame => "Referee not found or Game not found",
            NotFound::FeedbackTarget => "Invalid referee name or game ID.",
            NotFound::Referee => "Referee not found.",
            NotFound::Game => "Game not found.",
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    NotFound(NotFound),
    /// The in-memory change was applied but writing it out failed.
    Persistence(PersistenceError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(kind) => write!(f, "{}", kind.message()),
            StoreError::Persistence(err) => write!(f, "failed to save records: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::NotFound(_) => None,
            StoreError::Persistence(err) => Some(err),
        }
    }
}

impl From<PersistenceError> for StoreError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

impl From<NotFound> for StoreError {
    fn from(value: NotFound) -> Self {
        Self::NotFound(value)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Success flag plus message, the shape every caller-facing surface reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub success: bool,
    pub message: String,
}

impl OperationOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl From<StoreResult<&'static str>> for OperationOutcome {
    fn from(value: StoreResult<&'static str>) -> Self {
        match value {
            Ok(message) => Self::ok(message),
            Err(err) => Self::failed(err.to_string()),
        }
    }
}

/// Referees, games and feedback held in memory and flushed in full to the
/// backing [`TableStore`] after every mutation.
///
/// Identity keys (`Name`, `Game ID`) are not unique. Lookups that need one row
/// use the first match in table order; removals drop every match. Removing a
/// referee or game leaves feedback rows and assignments that name it in place.
pub struct RecordStore {
    tables: Tables,
    backend: Box<dyn TableStore>,
}

impl RecordStore {
    pub fn open(backend: Box<dyn TableStore>) -> PersistenceResult<Self> {
        let tables = backend.load_tables()?;
        info!(
            backend = %backend.describe(),
            referees = tables.referees.len(),
            games = tables.games.len(),
            feedback = tables.feedback.len(),
            "record store opened"
        );
        Ok(Self { tables, backend })
    }

    pub fn in_memory() -> Self {
        Self {
            tables: Tables::default(),
            backend: Box::new(MemoryStore),
        }
    }

    pub fn referees(&self) -> &[Referee] {
        &self.tables.referees
    }

    pub fn games(&self) -> &[Game] {
        &self.tables.games
    }

    pub fn feedback(&self) -> &[Feedback] {
        &self.tables.feedback
    }

    pub fn add_referee(
        &mut self,
        name: impl Into<String>,
        expertise: impl Into<String>,
    ) -> StoreResult<&'static str> {
        let referee = Referee::new(name, expertise);
        info!(name = %referee.name, "adding referee");
        self.tables.referees.push(referee);
        self.save()?;
        Ok(REFEREE_ADDED)
    }

    pub fn add_game(
        &mut self,
        game_id: impl Into<GameId>,
        game_name: impl Into<String>,
    ) -> StoreResult<&'static str> {
        let game = Game::new(game_id, game_name);
        info!(game_id = %game.game_id, "adding game");
        self.tables.games.push(game);
        self.save()?;
        Ok(GAME_ADDED)
    }

    pub fn assign_referee_to_game(
        &mut self,
        game_id: impl Into<GameId>,
        referee_name: &str,
    ) -> StoreResult<&'static str> {
        let game_id = game_id.into();
        let game_idx = match (self.game_index(&game_id), self.has_referee(referee_name)) {
            (Some(idx), true) => idx,
            _ => {
                warn!(game_id = %game_id, referee = referee_name, "assignment target missing");
                return Err(NotFound::RefereeOrGame.into());
            }
        };
        info!(game_id = %game_id, referee = referee_name, "assigning referee");
        self.tables.games[game_idx]
            .assigned_referees
            .push(referee_name.to_string());
        self.save()?;
        Ok(REFEREE_ASSIGNED)
    }

    pub fn add_feedback(
        &mut self,
        game_id: impl Into<GameId>,
        referee_name: &str,
        performance: impl Into<String>,
    ) -> StoreResult<&'static str> {
        let game_id = game_id.into();
        if !(self.has_referee(referee_name) && self.game_index(&game_id).is_some()) {
            warn!(game_id = %game_id, referee = referee_name, "feedback target missing");
            return Err(NotFound::FeedbackTarget.into());
        }
        info!(game_id = %game_id, referee = referee_name, "adding feedback");
        self.tables
            .feedback
            .push(Feedback::new(game_id, referee_name, performance));
        self.save()?;
        Ok(FEEDBACK_ADDED)
    }

    pub fn remove_referee(&mut self, name: &str) -> StoreResult<&'static str> {
        if !self.has_referee(name) {
            warn!(name, "referee to remove not found");
            return Err(NotFound::Referee.into());
        }
        let before = self.tables.referees.len();
        self.tables.referees.retain(|referee| referee.name != name);
        info!(name, removed = before - self.tables.referees.len(), "removed referee");
        self.save()?;
        Ok(REFEREE_REMOVED)
    }

    pub fn remove_game(&mut self, game_id: impl Into<GameId>) -> StoreResult<&'static str> {
        let game_id = game_id.into();
        if self.game_index(&game_id).is_none() {
            warn!(game_id = %game_id, "game to remove not found");
            return Err(NotFound::Game.into());
        }
        let before = self.tables.games.len();
        self.tables.games.retain(|game| game.game_id != game_id);
        info!(game_id = %game_id, removed = before - self.tables.games.len(), "removed game");
        self.save()?;
        Ok(GAME_REMOVED)
    }

    fn has_referee(&self, name: &str) -> bool {
        self.tables.referees.iter().any(|referee| referee.name == name)
    }

    fn game_index(&self, game_id: &GameId) -> Option<usize> {
        self.tables
            .games
            .iter()
            .position(|game| &game.game_id == game_id)
    }

    fn save(&self) -> PersistenceResult<()> {
        debug!(backend = %self.backend.describe(), "flushing tables");
        self.backend.save_tables(&self.tables)
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
