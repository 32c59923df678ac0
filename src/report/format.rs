//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays free of presentation concerns
//! - output changes are localized

use std::path::Path;

use crate::domain::{Schema, Table};
use crate::train::TrainOutcome;

/// Widest a preview cell may get before it is truncated.
const MAX_CELL: usize = 18;

/// Render a table as aligned text (header, rule, one line per row).
pub fn format_preview(table: &Table) -> String {
    let headers = table.schema.names();
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|v| truncate(&v.to_string(), MAX_CELL)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(j, h)| {
            cells
                .iter()
                .map(|row| row[j].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, headers.iter().map(|h| h.to_string()), &widths);
    push_line(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);
    for row in cells {
        push_line(&mut out, row.into_iter(), &widths);
    }
    out
}

/// Summary printed by `churn-synth check`.
pub fn format_check_summary(path: &Path, schema: &Schema, rows: usize) -> String {
    let mut out = String::new();
    out.push_str("=== churn-synth - reference data ===\n");
    out.push_str(&format!("File: {}\n", path.display()));
    out.push_str(&format!("Rows: {rows} | Columns: {}\n", schema.width()));
    out.push_str(&format!("Order: {}\n", schema.names().join(", ")));
    out
}

/// Summary printed by `churn-synth train`.
pub fn format_train_summary(outcome: &TrainOutcome, rows: usize, model_path: &Path) -> String {
    let mut out = String::new();
    out.push_str("=== churn-synth - training ===\n");
    out.push_str(&format!("Rows: {rows}\n"));
    out.push_str(&format!(
        "Loss: D={:.4} G={:.4}\n",
        outcome.discriminator_loss, outcome.generator_loss
    ));
    out.push_str(&format!("Model accuracy: {:.2}%\n", outcome.accuracy));
    out.push_str(&format!("Saved generator: {}\n", model_path.display()));
    out
}

/// Header shown above the generated preview.
pub fn format_generate_summary(total_rows: usize, accuracy: f64) -> String {
    format!(
        "=== churn-synth - generated {total_rows} rows (model accuracy {accuracy:.2}%) ===\n"
    )
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(c, w)| format!("{c:<w$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
