//! Output formatting for CLI

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// Render a single item as a two column field/value table
pub fn render_table<T: TableDisplay>(item: &T) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["Field", "Value"]);
    for (header, value) in T::headers().into_iter().zip(item.row()) {
        table.add_row(vec![header.to_string(), value]);
    }
    table
}

/// Print a single item
pub fn print_item<T: Serialize + TableDisplay>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", render_table(item)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
        }
    }
}

/// Print a simple message
pub fn print_message(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "message": message })),
        OutputFormat::Table => println!("{}", message),
    }
}

/// Print success message
pub fn print_success(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_message(message, format),
        OutputFormat::Table => println!("✅ {}", message),
    }
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair;

    impl TableDisplay for Pair {
        fn headers() -> Vec<&'static str> {
            vec!["ID", "State"]
        }

        fn row(&self) -> Vec<String> {
            vec!["a1".to_string(), "connected".to_string()]
        }
    }

    #[test]
    fn test_render_table_one_row_per_field() {
        let rendered = render_table(&Pair).to_string();
        assert!(rendered.contains("Field"));
        assert!(rendered.contains("State"));
        assert!(rendered.contains("connected"));
        assert_eq!(render_table(&Pair).row_iter().count(), 2);
    }
}
