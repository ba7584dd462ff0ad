use super::{PersistenceError, PersistenceResult, TableStore, Tables};
use crate::model::{Feedback, Game, Referee};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const REFEREES_FILE: &str = "referees.json";
pub const GAMES_FILE: &str = "games.json";
pub const FEEDBACK_FILE: &str = "feedback.json";

/// One JSON array of records per table, all in the same directory.
#[derive(Debug, Clone)]
pub struct JsonDirectoryStore {
    dir: PathBuf,
}

impl JsonDirectoryStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> PersistenceResult<Self> {
        let dir = dir.into();
        if dir.exists() && !dir.is_dir() {
            return Err(PersistenceError::InvalidData(format!(
                "{} exists and is not a directory",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    pub fn referees_path(&self) -> PathBuf {
        self.dir.join(REFEREES_FILE)
    }

    pub fn games_path(&self) -> PathBuf {
        self.dir.join(GAMES_FILE)
    }

    pub fn feedback_path(&self) -> PathBuf {
        self.dir.join(FEEDBACK_FILE)
    }
}

impl TableStore for JsonDirectoryStore {
    fn load_tables(&self) -> PersistenceResult<Tables> {
        Ok(Tables {
            referees: load_table(&self.referees_path())?,
            games: load_table(&self.games_path())?,
            feedback: load_table(&self.feedback_path())?,
        })
    }

    fn save_tables(&self, tables: &Tables) -> PersistenceResult<()> {
        fs::create_dir_all(&self.dir)?;
        save_table(&self.referees_path(), &tables.referees)?;
        save_table(&self.games_path(), &tables.games)?;
        save_table(&self.feedback_path(), &tables.feedback)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json directory {}", self.dir.display())
    }
}

/// A missing or unreadable table file loads as an empty table.
fn load_table<T: DeserializeOwned>(path: &Path) -> PersistenceResult<Vec<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no stored table, starting empty");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };
    match serde_json::from_reader(BufReader::new(file)) {
        Ok(rows) => Ok(rows),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "stored table is unreadable, starting empty");
            Ok(Vec::new())
        }
    }
}

fn save_table<T: Serialize>(path: &Path, rows: &[T]) -> PersistenceResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

const REFEREE_HEADERS: [&str; 3] = ["Name", "Expertise", "Availability"];
const GAME_HEADERS: [&str; 3] = ["Game ID", "Game Name", "Assigned Referees"];
const FEEDBACK_HEADERS: [&str; 3] = ["Game ID", "Referee Name", "Performance"];

#[derive(Serialize)]
struct GameCsvRecord<'a> {
    game_id: &'a str,
    game_name: &'a str,
    assigned_referees: String,
}

impl<'a> From<&'a Game> for GameCsvRecord<'a> {
    fn from(game: &'a Game) -> Self {
        Self {
            game_id: game.game_id.as_str(),
            game_name: &game.game_name,
            assigned_referees: join_strings(&game.assigned_referees),
        }
    }
}

pub fn export_referees_csv<P: AsRef<Path>>(referees: &[Referee], path: P) -> PersistenceResult<()> {
    write_csv(path, &REFEREE_HEADERS, referees.iter())
}

pub fn export_games_csv<P: AsRef<Path>>(games: &[Game], path: P) -> PersistenceResult<()> {
    write_csv(path, &GAME_HEADERS, games.iter().map(GameCsvRecord::from))
}

pub fn export_feedback_csv<P: AsRef<Path>>(feedback: &[Feedback], path: P) -> PersistenceResult<()> {
    write_csv(path, &FEEDBACK_HEADERS, feedback.iter())
}

// Headers are written up front so empty tables still export their columns.
fn write_csv<P, R, I>(path: P, headers: &[&str], rows: I) -> PersistenceResult<()>
where
    P: AsRef<Path>,
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn join_strings(values: &[String]) -> String {
    values.join(";")
}
