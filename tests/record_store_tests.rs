use referee_scheduler::{
    Feedback, GameId, NotFound, OperationOutcome, PersistenceError, PersistenceResult,
    RecordStore, Referee, StoreError, TableStore, Tables,
};
use std::io;
use std::sync::{Arc, Mutex};

/// Counts saves and keeps the last snapshot written.
#[derive(Clone, Default)]
struct RecordingStore {
    saved: Arc<Mutex<Vec<Tables>>>,
}

impl TableStore for RecordingStore {
    fn load_tables(&self) -> PersistenceResult<Tables> {
        Ok(Tables::default())
    }

    fn save_tables(&self, tables: &Tables) -> PersistenceResult<()> {
        self.saved.lock().unwrap().push(tables.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "recording".into()
    }
}

struct FailingStore;

impl TableStore for FailingStore {
    fn load_tables(&self) -> PersistenceResult<Tables> {
        Ok(Tables::default())
    }

    fn save_tables(&self, _tables: &Tables) -> PersistenceResult<()> {
        Err(PersistenceError::Io(io::Error::other("disk full")))
    }

    fn describe(&self) -> String {
        "failing".into()
    }
}

fn recording_store() -> (RecordStore, RecordingStore) {
    let backend = RecordingStore::default();
    let store = RecordStore::open(Box::new(backend.clone())).unwrap();
    (store, backend)
}

#[test]
fn add_referee_creates_available_row() {
    let mut store = RecordStore::in_memory();
    assert_eq!(store.add_referee("Alice", "Soccer").unwrap(), "Referee added successfully.");
    assert_eq!(store.referees(), &[Referee::new("Alice", "Soccer")]);
    assert!(store.referees()[0].availability);
}

#[test]
fn empty_names_and_ids_are_accepted() {
    let mut store = RecordStore::in_memory();
    store.add_referee("", "").unwrap();
    store.add_game("", "").unwrap();
    assert_eq!(store.referees().len(), 1);
    assert_eq!(store.games()[0].game_id, "");
    assert!(store.games()[0].assigned_referees.is_empty());
}

#[test]
fn end_to_end_leaves_orphaned_references() {
    let mut store = RecordStore::in_memory();
    store.add_referee("Alice", "Soccer").unwrap();
    store.add_game("1", "Final").unwrap();

    assert_eq!(
        store.assign_referee_to_game("1", "Alice").unwrap(),
        "Referee assigned successfully"
    );
    assert_eq!(store.games()[0].assigned_referees, vec!["Alice".to_string()]);

    assert_eq!(
        store.add_feedback("1", "Alice", "Great call").unwrap(),
        "Feedback added successfully."
    );
    assert_eq!(store.feedback(), &[Feedback::new("1", "Alice", "Great call")]);

    assert_eq!(store.remove_referee("Alice").unwrap(), "Referee removed successfully.");
    assert!(store.referees().is_empty());
    assert_eq!(store.games()[0].assigned_referees, vec!["Alice".to_string()]);
    assert_eq!(store.feedback().len(), 1);
}

#[test]
fn assignment_requires_referee_and_game() {
    let mut store = RecordStore::in_memory();
    store.add_referee("Alice", "Soccer").unwrap();

    let err = store.assign_referee_to_game("999", "Alice").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(NotFound::RefereeOrGame)));
    assert_eq!(err.to_string(), "Referee not found or Game not found");
    assert!(store.games().is_empty());
    assert_eq!(store.referees().len(), 1);

    store.add_game("1", "Final").unwrap();
    let err = store.assign_referee_to_game("1", "Bob").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(NotFound::RefereeOrGame)));
    assert!(store.games()[0].assigned_referees.is_empty());
}

#[test]
fn feedback_requires_referee_and_game() {
    let mut store = RecordStore::in_memory();
    store.add_game("1", "Final").unwrap();

    let err = store.add_feedback("1", "Nobody", "n/a").unwrap_err();
    assert_eq!(err.to_string(), "Invalid referee name or game ID.");

    store.add_referee("Alice", "Soccer").unwrap();
    let err = store.add_feedback("2", "Alice", "n/a").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(NotFound::FeedbackTarget)));
    assert!(store.feedback().is_empty());
}

#[test]
fn lookups_are_exact_matches() {
    let mut store = RecordStore::in_memory();
    store.add_referee("Alice", "Soccer").unwrap();
    store.add_game("1", "Final").unwrap();

    assert!(store.assign_referee_to_game("1", "alice").is_err());
    assert!(store.assign_referee_to_game("1", " Alice").is_err());
    assert!(store.assign_referee_to_game(" 1", "Alice").is_err());
    assert!(store.remove_referee("ALICE").is_err());
}

#[test]
fn assignment_targets_first_matching_game() {
    let mut store = RecordStore::in_memory();
    store.add_referee("Alice", "Soccer").unwrap();
    store.add_game("1", "Morning").unwrap();
    store.add_game("1", "Evening").unwrap();

    store.assign_referee_to_game("1", "Alice").unwrap();
    store.assign_referee_to_game("1", "Alice").unwrap();

    assert_eq!(store.games()[0].assigned_referees, vec!["Alice", "Alice"]);
    assert!(store.games()[1].assigned_referees.is_empty());
}

#[test]
fn remove_referee_removes_every_match_and_nothing_else() {
    let mut store = RecordStore::in_memory();
    store.add_referee("Alice", "Soccer").unwrap();
    store.add_referee("Bob", "Rugby").unwrap();
    store.add_referee("Alice", "Hockey").unwrap();

    store.remove_referee("Alice").unwrap();
    assert_eq!(store.referees(), &[Referee::new("Bob", "Rugby")]);
}

#[test]
fn removing_unknown_records_fails_without_changes() {
    let (mut store, backend) = recording_store();
    store.add_referee("Bob", "Rugby").unwrap();
    store.add_game("1", "Final").unwrap();
    let saves_before = backend.saved.lock().unwrap().len();

    let err = store.remove_referee("Alice").unwrap_err();
    assert_eq!(err.to_string(), "Referee not found.");
    let err = store.remove_game("2").unwrap_err();
    assert_eq!(err.to_string(), "Game not found.");

    assert_eq!(store.referees().len(), 1);
    assert_eq!(store.games().len(), 1);
    assert_eq!(backend.saved.lock().unwrap().len(), saves_before);
}

#[test]
fn remove_game_accepts_numeric_and_text_ids() {
    let mut store = RecordStore::in_memory();
    store.add_game("5", "Quarter").unwrap();
    store.add_game("5", "Quarter replay").unwrap();
    store.add_game("6", "Semi").unwrap();

    assert_eq!(store.remove_game(5).unwrap(), "Game removed successfully.");
    assert_eq!(store.games().len(), 1);
    assert_eq!(store.games()[0].game_id, GameId::from("6"));

    store.add_game(7u32, "Final").unwrap();
    store.remove_game("7").unwrap();
    assert_eq!(store.games().len(), 1);
}

#[test]
fn every_mutation_flushes_all_tables() {
    let (mut store, backend) = recording_store();
    store.add_referee("Alice", "Soccer").unwrap();
    store.add_game("1", "Final").unwrap();
    store.assign_referee_to_game("1", "Alice").unwrap();
    store.add_feedback("1", "Alice", "Sharp").unwrap();
    store.remove_game("1").unwrap();
    store.remove_referee("Alice").unwrap();
    let _ = store.referees();
    let _ = store.assign_referee_to_game("1", "Alice");

    let saved = backend.saved.lock().unwrap();
    assert_eq!(saved.len(), 6);
    let after_feedback = &saved[3];
    assert_eq!(after_feedback.referees.len(), 1);
    assert_eq!(after_feedback.games[0].assigned_referees, vec!["Alice"]);
    assert_eq!(after_feedback.feedback.len(), 1);
    let last = saved.last().unwrap();
    assert!(last.referees.is_empty());
    assert!(last.games.is_empty());
    assert_eq!(last.feedback.len(), 1);
}

#[test]
fn save_failures_surface_as_persistence_errors() {
    let mut store = RecordStore::open(Box::new(FailingStore)).unwrap();
    let err = store.add_referee("Alice", "Soccer").unwrap_err();
    assert!(matches!(err, StoreError::Persistence(_)));
    assert!(err.to_string().contains("disk full"));

    let outcome = OperationOutcome::from(store.remove_referee("Nobody"));
    assert!(!outcome.success);
    assert_eq!(outcome.message, "Referee not found.");
}

#[test]
fn outcome_carries_success_flag_and_message() {
    let mut store = RecordStore::in_memory();
    let outcome = OperationOutcome::from(store.add_game("1", "Final"));
    assert_eq!(outcome, OperationOutcome::ok("Game added successfully."));

    let outcome = OperationOutcome::from(store.assign_referee_to_game("1", "Ghost"));
    assert_eq!(
        outcome,
        OperationOutcome::failed("Referee not found or Game not found")
    );
}
