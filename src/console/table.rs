//! Table state for the three collections and its HTML and text renderings.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use super::format::CellFormatter;

/// Projection of one backend record onto a table row, in column order.
pub trait TableRow {
    fn cells(&self, fmt: &CellFormatter) -> Vec<String>;
}

/// What a collection table currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState {
    /// No fetch has settled yet.
    Loading,
    /// Rows from the latest applied fetch, one cell per column.
    Ready(Vec<Vec<String>>),
    /// The latest applied fetch failed.
    Failed(String),
}

impl TableState {
    pub fn rows(&self) -> &[Vec<String>] {
        match self {
            TableState::Ready(rows) => rows,
            TableState::Loading | TableState::Failed(_) => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TableState::Failed(_))
    }
}

/// Holds one table's state and orders the fetches that feed it.
///
/// Each fetch takes a ticket before it starts. A settled fetch replaces the
/// state only if its ticket is newer than the one that produced the current
/// state, so overlapping fetches cannot roll the table back.
#[derive(Debug)]
pub(crate) struct TableSlot {
    issued: AtomicU64,
    current: RwLock<Applied>,
}

#[derive(Debug)]
struct Applied {
    ticket: u64,
    state: TableState,
}

impl TableSlot {
    pub(crate) fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            current: RwLock::new(Applied {
                ticket: 0,
                state: TableState::Loading,
            }),
        }
    }

    pub(crate) fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a settled fetch and return the state the table shows afterwards.
    pub(crate) async fn settle(&self, ticket: u64, state: TableState) -> TableState {
        let mut current = self.current.write().await;
        if ticket > current.ticket {
            current.ticket = ticket;
            current.state = state;
        } else {
            tracing::debug!(ticket, applied = current.ticket, "stale fetch discarded");
        }
        current.state.clone()
    }

    pub(crate) async fn snapshot(&self) -> TableState {
        self.current.read().await.state.clone()
    }
}

/// Escape text for use in HTML content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render the `<tbody>` for a table with the given columns.
pub fn render_tbody(state: &TableState, columns: &[&str]) -> String {
    let mut html = String::from("<tbody>");
    match state {
        TableState::Loading => html.push_str(&format!(
            r#"<tr class="loading"><td colspan="{}">Loading&hellip;</td></tr>"#,
            columns.len()
        )),
        TableState::Failed(reason) => html.push_str(&format!(
            r#"<tr class="error"><td colspan="{}">Could not load: {}</td></tr>"#,
            columns.len(),
            escape_html(reason)
        )),
        TableState::Ready(rows) => {
            for row in rows {
                html.push_str("<tr>");
                for cell in row {
                    html.push_str("<td>");
                    html.push_str(&escape_html(cell));
                    html.push_str("</td>");
                }
                html.push_str("</tr>");
            }
        }
    }
    html.push_str("</tbody>");
    html
}

/// Render a table as aligned plain text with a header row.
pub fn render_text(state: &TableState, columns: &[&str]) -> String {
    match state {
        TableState::Loading => return "loading...\n".to_string(),
        TableState::Failed(reason) => return format!("error: {reason}\n"),
        TableState::Ready(_) => {}
    }

    let rows = state.rows();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(heading.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut out = padded_line(columns.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("-+-")));
    for row in rows {
        out.push_str(&padded_line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn padded_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    format!("{}\n", padded.join(" | ").trim_end())
}
