use std::io::{self, BufRead, Write};
use std::process;

use polars::prelude::{DataFrame, PolarsResult};
use referee_scheduler::{
    AppConfig, OperationOutcome, RecordStore, StoreResult, export_feedback_csv, export_games_csv,
    export_referees_csv, logging,
    snapshot::{feedback_frame, games_frame, referees_frame, render_text_table},
};

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  add-referee                        Add a referee (prompts for name, expertise)\n  add-game                           Add a game (prompts for game id, game name)\n  assign                             Assign a referee to a game (prompts for game id, referee name)\n  feedback                           Record performance feedback (prompts for game id, referee name, feedback)\n  remove-referee                     Remove every referee with a name (prompts for name)\n  remove-game                        Remove every game with an id (prompts for game id)\n  referees                           Display referees\n  games                              Display games\n  show-feedback                      Display feedback\n  export <referees|games|feedback> <path>\n                                     Write a table to CSV\n  quit|exit                          Exit"
    );
}

/// Reads form fields one line at a time. `None` means stdin is exhausted.
struct Form<R: BufRead> {
    input: R,
    line: String,
}

impl<R: BufRead> Form<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }

    fn read_line(&mut self) -> Option<String> {
        self.line.clear();
        match self.input.read_line(&mut self.line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(self.line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn field(&mut self, label: &str) -> Option<String> {
        print!("{label}: ");
        let _ = io::stdout().flush();
        self.read_line()
    }
}

fn report(result: StoreResult<&'static str>) {
    let outcome = OperationOutcome::from(result);
    if outcome.success {
        println!("OK: {}", outcome.message);
    } else {
        println!("Error: {}", outcome.message);
    }
}

fn print_table(title: &str, frame: PolarsResult<DataFrame>) {
    match frame {
        Ok(df) => println!("{title}\n{}", render_text_table(&df)),
        Err(e) => println!("Error rendering {title}: {e}"),
    }
}

fn export(store: &RecordStore, table: &str, path: &str) {
    let result = match table {
        "referees" => export_referees_csv(store.referees(), path),
        "games" => export_games_csv(store.games(), path),
        "feedback" => export_feedback_csv(store.feedback(), path),
        _ => {
            println!("Unknown table '{table}'. Use referees, games or feedback.");
            return;
        }
    };
    match result {
        Ok(()) => println!("Exported {table} to {path}"),
        Err(e) => println!("Error: {e}"),
    }
}

fn main() {
    dotenvy::dotenv().ok();
    logging::init_logging("warn");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(2);
        }
    };
    let mut store = match config.open_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open records in {}: {e}", config.data_dir.display());
            process::exit(1);
        }
    };

    println!("Referee Scheduling System (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut form = Form::new(stdin.lock());
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(line) = form.read_line() else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "add-referee" => {
                let Some(name) = form.field("Referee Name") else { break };
                let Some(expertise) = form.field("Referee Expertise") else { break };
                report(store.add_referee(name, expertise));
            }
            "add-game" => {
                let Some(game_id) = form.field("Game ID") else { break };
                let Some(game_name) = form.field("Game Name") else { break };
                report(store.add_game(game_id, game_name));
            }
            "assign" => {
                let Some(game_id) = form.field("Game ID") else { break };
                let Some(referee_name) = form.field("Referee Name") else { break };
                report(store.assign_referee_to_game(game_id, &referee_name));
            }
            "feedback" => {
                let Some(game_id) = form.field("Game ID") else { break };
                let Some(referee_name) = form.field("Referee Name") else { break };
                let Some(performance) = form.field("Performance Feedback") else { break };
                report(store.add_feedback(game_id, &referee_name, performance));
            }
            "remove-referee" => {
                let Some(name) = form.field("Referee Name to Remove") else { break };
                report(store.remove_referee(&name));
            }
            "remove-game" => {
                let Some(game_id) = form.field("Game ID to Remove") else { break };
                report(store.remove_game(game_id));
            }
            "referees" => print_table("List of Referees", referees_frame(store.referees())),
            "games" => print_table("List of Games", games_frame(store.games())),
            "show-feedback" => print_table("Feedback", feedback_frame(store.feedback())),
            "export" => {
                let table = parts.next();
                let rest: Vec<&str> = parts.collect();
                match (table, !rest.is_empty()) {
                    (Some(table), true) => export(&store, table, &rest.join(" ")),
                    _ => println!("Usage: export <referees|games|feedback> <path>"),
                }
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
