//! Output rendering for records and pages.

use clap::ValueEnum;
use colored::Colorize;
use serde_json::Value;
use sumocse::Record;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One row per record with the common columns.
    Table,
    /// Pretty-printed JSON of the full records.
    Json,
    /// One block per record with every field.
    Details,
}

/// Placeholder for absent fields.
const NA: &str = "-";

/// Render a set of records in the selected format.
pub fn render_records(records: &[Record], format: OutputFormat) {
    match format {
        OutputFormat::Table => render_table(records),
        OutputFormat::Json => render_json(records),
        OutputFormat::Details => render_details(records),
    }
}

/// Render a single record in the selected format.
pub fn render_record(record: &Record, format: OutputFormat) {
    match format {
        OutputFormat::Table => render_table(std::slice::from_ref(record)),
        OutputFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(record).expect("records serialize to JSON");
            println!("{rendered}");
        }
        OutputFormat::Details => render_details(std::slice::from_ref(record)),
    }
}

fn render_table(records: &[Record]) {
    if records.is_empty() {
        println!("No records found.");
        return;
    }

    println!(
        "{} {} {} {} {}",
        format!("{:<26}", "ID").bold(),
        format!("{:<32}", "NAME").bold(),
        format!("{:<8}", "SEVERITY").bold(),
        format!("{:<14}", "STATUS").bold(),
        format!("{:<16}", "CREATED").bold(),
    );
    println!("{}", "-".repeat(100));

    for record in records {
        let status = record
            .extra_nested_str("status", "displayName")
            .or_else(|| record.extra_str("status"))
            .unwrap_or(NA);
        println!(
            "{:<26} {:<32} {:<8} {:<14} {:<16}",
            clip(record.id.as_deref().unwrap_or(NA), 26),
            clip(record.name.as_deref().unwrap_or(NA), 32),
            clip(record.severity.as_deref().unwrap_or(NA), 8),
            clip(status, 14),
            clip(record.created.as_deref().unwrap_or(NA), 16),
        );
    }
    println!("\n{} record(s)", records.len());
}

fn render_json(records: &[Record]) {
    let rendered = serde_json::to_string_pretty(records).expect("records serialize to JSON");
    println!("{rendered}");
}

fn render_details(records: &[Record]) {
    if records.is_empty() {
        println!("No records found.");
        return;
    }

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", "=".repeat(60));
        print_field("ID", record.id.as_deref());
        print_field("Name", record.name.as_deref());
        print_field("Severity", record.severity.as_deref());
        print_field("Created", record.created.as_deref());
        if let Some(enabled) = record.enabled {
            println!("{}: {enabled}", "Enabled".bold());
        }
        for (key, value) in &record.extra {
            println!("{}: {}", key.bold(), clip(&compact(value), 120));
        }
    }
}

fn print_field(label: &str, value: Option<&str>) {
    println!("{}: {}", label.bold(), value.unwrap_or(NA));
}

fn compact(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truncate to at most `max` characters.
fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("exactly-ten", 11), "exactly-ten");
        assert_eq!(clip("a-rather-long-identifier", 8), "a-rather");
    }

    #[test]
    fn test_compact_strings_unquoted() {
        assert_eq!(compact(&Value::String("plain".to_string())), "plain");
        assert_eq!(compact(&serde_json::json!({"k": 1})), r#"{"k":1}"#);
    }
}
