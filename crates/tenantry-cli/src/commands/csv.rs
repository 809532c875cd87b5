//! csv command - preview how an import file is split into records

use super::CommandContext;
use crate::utils::truncate;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tenantry_core::utils::{parse_csv, CsvTable};

const CELL_WIDTH: usize = 24;

#[derive(Serialize)]
struct CsvPreview<'a> {
    headers: &'a [String],
    rows: &'a [std::collections::BTreeMap<String, String>],
    total_rows: usize,
}

pub async fn execute(ctx: &CommandContext, path: &str, limit: Option<usize>) -> Result<()> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path))?;
    let table = parse_csv(&text);
    ctx.debug(&format!(
        "Parsed {} header(s) and {} row(s)",
        table.headers.len(),
        table.rows.len()
    ));

    let shown = limit.unwrap_or(table.rows.len()).min(table.rows.len());

    if ctx.is_json() {
        return ctx.print_json(&CsvPreview {
            headers: &table.headers,
            rows: &table.rows[..shown],
            total_rows: table.rows.len(),
        });
    }

    if table.is_empty() {
        ctx.info("(empty file)");
        return Ok(());
    }

    for line in render(&table, shown) {
        println!("{}", line);
    }

    if !ctx.quiet {
        println!();
        if shown < table.rows.len() {
            println!("Showing {} of {} row(s)", shown, table.rows.len());
        } else {
            println!("Total: {} row(s)", table.rows.len());
        }
        if !table.has_column("email") {
            println!("{}", "No 'email' column: this file cannot be imported as users".yellow());
        }
    }

    Ok(())
}

/// Fixed-width lines: the header, then one line per shown row.
fn render(table: &CsvTable, shown: usize) -> Vec<String> {
    let cell = |text: &str| format!("{:<width$}", truncate(text, CELL_WIDTH), width = CELL_WIDTH);

    let mut lines = vec![table
        .headers
        .iter()
        .map(|h| cell(h))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .bold()
        .to_string()];

    for row in &table.rows[..shown] {
        let line = table
            .headers
            .iter()
            .map(|h| cell(row.get(h).map(String::as_str).unwrap_or("")))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(line.trim_end().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pads_and_limits() {
        colored::control::set_override(false);
        let table = parse_csv("email,name\na@x.com,Ann\nb@x.com,Ben\n");
        let lines = render(&table, 1);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("email"));
        assert!(lines[0].ends_with("name"));
        assert_eq!(lines[1], format!("{:<24} Ann", "a@x.com"));
    }
}
