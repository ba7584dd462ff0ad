//! Read-only tabular views of the record tables.
//!
//! Each table becomes a polars [`DataFrame`] with the stored column names, which
//! the presentation layer renders as a plain text table.

use crate::model::{Feedback, Game, Referee};
use polars::prelude::PlSmallStr;
use polars::prelude::*;

pub fn referees_frame(referees: &[Referee]) -> PolarsResult<DataFrame> {
    let names: Vec<&str> = referees.iter().map(|r| r.name.as_str()).collect();
    let expertise: Vec<&str> = referees.iter().map(|r| r.expertise.as_str()).collect();
    let availability: Vec<bool> = referees.iter().map(|r| r.availability).collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("Name"), names).into_column(),
        Series::new(PlSmallStr::from_static("Expertise"), expertise).into_column(),
        Series::new(PlSmallStr::from_static("Availability"), availability).into_column(),
    ])
}

pub fn games_frame(games: &[Game]) -> PolarsResult<DataFrame> {
    let ids: Vec<&str> = games.iter().map(|g| g.game_id.as_str()).collect();
    let names: Vec<&str> = games.iter().map(|g| g.game_name.as_str()).collect();
    let assigned: Vec<Series> = games
        .iter()
        .map(|g| series_from_string_list(&g.assigned_referees))
        .collect();
    let assigned = if assigned.is_empty() {
        Series::new_empty(
            PlSmallStr::from_static("Assigned Referees"),
            &DataType::List(Box::new(DataType::String)),
        )
    } else {
        Series::new(PlSmallStr::from_static("Assigned Referees"), assigned)
    };

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("Game ID"), ids).into_column(),
        Series::new(PlSmallStr::from_static("Game Name"), names).into_column(),
        assigned.into_column(),
    ])
}

pub fn feedback_frame(feedback: &[Feedback]) -> PolarsResult<DataFrame> {
    let ids: Vec<&str> = feedback.iter().map(|f| f.game_id.as_str()).collect();
    let referees: Vec<&str> = feedback.iter().map(|f| f.referee_name.as_str()).collect();
    let performance: Vec<&str> = feedback.iter().map(|f| f.performance.as_str()).collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("Game ID"), ids).into_column(),
        Series::new(PlSmallStr::from_static("Referee Name"), referees).into_column(),
        Series::new(PlSmallStr::from_static("Performance"), performance).into_column(),
    ])
}

fn series_from_string_list(values: &[String]) -> Series {
    let inner: Vec<&str> = values.iter().map(|s| s.as_str()).collect();
    Series::new(PlSmallStr::from_static(""), inner)
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Boolean(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::List(inner) => match inner.str() {
            Ok(ca) => ca.into_iter().flatten().collect::<Vec<_>>().join(", "),
            Err(_) => value.to_string(),
        },
        _ => value.to_string(),
    }
}

/// Renders a frame as an ASCII table with a header row.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
            .collect();
        cells.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &col_names, &widths);
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_row(out: &mut String, row: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, width) in row.iter().zip(widths) {
        out.push(' ');
        out.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        out.push_str(&" ".repeat(pad));
        out.push_str(" |");
    }
    out.push('\n');
}
