//! Output helpers for the `crewrate` CLI.

use serde::Serialize;
use std::io::{self, Write};

use crewrate_ui::table::{render_pairs, render_table};

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a table with headers and rows. Nothing is printed without rows.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    print_block(&render_table(headers, rows));
}

/// Print aligned `label  value` lines.
pub fn output_pairs(pairs: &[(String, String)]) {
    print_block(&render_pairs(pairs));
}

fn print_block(text: &str) {
    if text.is_empty() {
        return;
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", text);
}
