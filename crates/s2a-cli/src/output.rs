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

/// Command output on stdout. Logs go to stderr or the log file instead.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", Some("✓".green().to_string()), msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", Some("⚠".yellow().to_string()), msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message("info", None, msg.as_ref());
    }

    /// Print a table in human mode; JSON callers emit their own document
    pub fn table(&self, table: &Table) {
        if self.quiet || self.format != OutputFormat::Human {
            return;
        }
        println!("{}", table);
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet {
            return;
        }
        let rendered = match self.format {
            OutputFormat::JsonPretty => serde_json::to_string_pretty(data),
            OutputFormat::Json | OutputFormat::Human => serde_json::to_string(data),
        };
        println!("{}", rendered.unwrap_or_default());
    }

    /// One line in human mode, `{"type", "message"}` otherwise
    fn message(&self, kind: &str, symbol: Option<String>, msg: &str) {
        if self.quiet {
            return;
        }
        match (self.format, symbol) {
            (OutputFormat::Human, Some(symbol)) => println!("{} {}", symbol, msg),
            (OutputFormat::Human, None) => println!("{}", msg),
            _ => self.json(&json!({ "type": kind, "message": msg })),
        }
    }
}

/// Table with the rounded UTF-8 style used by every command
pub fn styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}
