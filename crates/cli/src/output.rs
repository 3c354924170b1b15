//! Plain-text rendering of dashboard view-models.

use std::io::{self, Write};

use storedash_admin::router::NavItem;
use storedash_admin::views::{DashboardMetrics, SettingsView, TableView};

/// Data URIs longer than this are abbreviated in table cells.
const MAX_CELL_CHARS: usize = 48;

/// The sidebar as a single line, active section in brackets.
pub fn nav(out: &mut impl Write, items: &[NavItem]) -> io::Result<()> {
    let line: Vec<String> = items
        .iter()
        .map(|item| {
            if item.active {
                format!("[{}]", item.label)
            } else {
                item.label.to_string()
            }
        })
        .collect();
    writeln!(out, "{}", line.join("  "))?;
    writeln!(out)
}

/// The four dashboard cards.
pub fn metrics(out: &mut impl Write, metrics: &DashboardMetrics) -> io::Result<()> {
    writeln!(out, "Total Products  {}", metrics.products)?;
    writeln!(out, "Total Orders    {}", metrics.orders)?;
    writeln!(out, "Total Users     {}", metrics.users)?;
    writeln!(out, "Revenue         {}", metrics.revenue_display())
}

/// The settings form.
pub fn settings(out: &mut impl Write, view: &SettingsView) -> io::Result<()> {
    writeln!(out, "Name      {}", view.name)?;
    writeln!(out, "Email     {}", view.email)?;
    writeln!(out, "Password  {}", view.password_display())
}

/// The visible rows of a table, numbered by display position.
///
/// Row numbers count hidden rows too, so they stay valid as arguments to
/// `products edit` and `products delete` after a search or filter.
pub fn table(out: &mut impl Write, table: &TableView) -> io::Result<()> {
    let mut header = vec!["#".to_string()];
    header.extend(table.config.columns.iter().map(|c| c.label.clone()));

    let mut lines = vec![header];
    for (position, row) in table.rows.iter().enumerate() {
        if !row.visible {
            continue;
        }
        if row.is_placeholder() {
            lines.push(vec![String::new(), row.cell(0).unwrap_or_default().to_string()]);
            continue;
        }
        let mut line = vec![(position + 1).to_string()];
        line.extend(row.cells.iter().map(|cell| abbreviate(cell)));
        lines.push(line);
    }

    let mut widths: Vec<usize> = Vec::new();
    for line in &lines {
        for (i, cell) in line.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    for line in &lines {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        writeln!(out, "{}", padded.join("  ").trim_end())?;
    }
    Ok(())
}

/// Shorten inline image data so rows stay on one line.
fn abbreviate(cell: &str) -> String {
    if !cell.starts_with("data:") || cell.chars().count() <= MAX_CELL_CHARS {
        return cell.to_string();
    }
    let (prefix, _) = cell.split_once(',').unwrap_or((cell, ""));
    format!("{prefix},... ({} bytes)", cell.len())
}
