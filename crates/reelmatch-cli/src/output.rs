use clap::ValueEnum;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", msg.as_ref(), |m| println!("{} {}", "✓".green(), m));
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message("info", msg.as_ref(), |m| println!("{}", m));
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", msg.as_ref(), |m| println!("{} {}", "⚠".yellow(), m));
    }

    fn message(&self, kind: &str, msg: &str, human: impl FnOnce(&str)) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => human(msg),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({"type": kind, "message": msg}));
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }
        self.print_json(data);
    }

    /// Section header followed by a table (human mode only)
    pub fn table(&self, title: &str, table: &Table) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("\n{}", title.bright_cyan().bold());
        println!("{}", table);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data).unwrap_or_default()),
            OutputFormat::Human => println!("{}", data),
        }
    }
}

/// Rounded UTF-8 table with a bold header row
pub fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

/// Two-column key/value table, skipping empty values
pub fn details_table(rows: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    for (key, value) in rows.iter().filter(|(_, v)| !v.is_empty()) {
        table.add_row(vec![Cell::new(key).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}

pub fn check_mark(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}
