//! Plain-text rendering of the visible window.

use scrollgrid_lib::model::{Alignment, Column};
use scrollgrid_lib::sort::SortDirection;
use scrollgrid_lib::window::WindowedRow;
use scrollgrid_lib::TableMediator;

/// Pixels per character cell when laying out text columns.
const PIXELS_PER_CHAR: f64 = 8.0;

fn chars(column: &Column) -> usize {
    (column.width / PIXELS_PER_CHAR).floor().max(1.0) as usize
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let text: String = text.chars().take(width).collect();
    match alignment {
        Alignment::Left => format!("{:<width$}", text),
        Alignment::Center => format!("{:^width$}", text),
        Alignment::Right => format!("{:>width$}", text),
    }
}

pub fn header<T: Send + Sync + 'static>(table: &TableMediator<T>) -> String {
    table
        .columns()
        .iter()
        .map(|column| {
            let marker = match table.sort_direction(&column.name) {
                Some(SortDirection::Asc) => " ^",
                Some(SortDirection::Desc) => " v",
                None => "",
            };
            pad(&format!("{}{}", column.label, marker), chars(column), column.alignment)
        })
        .collect::<Vec<_>>()
        .join("|")
}

pub fn row<T>(columns: &[Column], windowed: &WindowedRow<T>) -> String {
    let cells = columns
        .iter()
        .map(|column| {
            let value = windowed
                .row
                .cell(&column.name)
                .map(|v| v.to_string())
                .unwrap_or_default();
            pad(&value, chars(column), column.alignment)
        })
        .collect::<Vec<_>>()
        .join("|");
    format!("{:>6.0} {}", windowed.rect.y, cells)
}

pub fn status_line<T: Send + Sync + 'static>(table: &TableMediator<T>) -> String {
    format!(
        "Status: {} | Loaded: {}",
        table.loading_state(),
        table.loaded_rows_len()
    )
}

/// Header, visible rows and status bar for the table's current viewport.
pub fn frame<T: Send + Sync + 'static>(table: &TableMediator<T>) -> String {
    let mut lines = vec![format!("       {}", header(table))];
    lines.extend(
        table
            .visible_rows()
            .iter()
            .map(|w| row(table.columns(), w)),
    );
    lines.push(status_line(table));
    lines.join("\n")
}
