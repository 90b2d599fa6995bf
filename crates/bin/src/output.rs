//! Output formatting helpers for human-readable and JSON output.

use notelock::note::NoteRecord;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

pub const NOTE_HEADERS: [&str; 5] = ["ID", "STATE", "TITLE", "PROBLEM", "MODIFIED"];

/// One table row for a note. Locked notes never show content.
pub fn note_row(note: &NoteRecord) -> Vec<String> {
    vec![
        note.id().to_string(),
        if note.is_locked() { "locked" } else { "open" }.to_string(),
        truncate(note.title.as_deref().unwrap_or("-"), 32),
        truncate(note.problem_url(), 48),
        note.last_modified.clone().unwrap_or_else(|| "-".to_string()),
    ]
}

/// Shorten `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Print a table with aligned columns in human-readable format.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    println!("{}", render_row(headers, &widths));
    for row in rows {
        let cells: Vec<&str> = row.iter().take(col_count).map(String::as_str).collect();
        println!("{}", render_row(&cells, &widths));
    }
}

fn render_row(cells: &[&str], widths: &[usize]) -> String {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    line.join("  ").trim_end().to_string()
}
