//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns, object::Rows},
};

/// Format rows as a table, numeric columns right-aligned from `first_numeric` on
pub fn format_table<T: Tabled>(data: &[T], first_numeric: usize) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(first_numeric..)).with(Alignment::right()))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
