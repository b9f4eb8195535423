//
//  abuseipdb-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Rendering of API results for the terminal:
//!
//! - **Table format**: human-readable tables and field lists for interactive use
//! - **JSON format**: pretty-printed JSON for scripting (`--json`)
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: the two output formats
//! - [`OutputWriter`]: writes values in the chosen format
//! - [`TableOutput`]: implemented by the response models that have a table view
//!
//! ## Example
//!
//! ```rust,ignore
//! use abuseipdb_client::output::OutputWriter;
//!
//! let writer = OutputWriter::from_json_flag(global.json);
//! writer.write(&check_data)?;
//! ```

mod models;
mod table;

pub use table::*;

use serde::Serialize;

/// The available output formats.
///
/// # Variants
///
/// * `Table` - Human-readable output, best for interactive terminal sessions
/// * `Json` - Pretty-printed JSON, ideal for piping to other tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tables and `key: value` listings, colored when the terminal allows it.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Writes values in one [`OutputFormat`] to stdout.
///
/// # Notes
///
/// Color output is detected from the terminal. Colors are disabled when
/// output is piped or `NO_COLOR` is set.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer for `format`, detecting color support.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Picks [`OutputFormat::Json`] when `json` is set, tables otherwise.
    pub fn from_json_flag(json: bool) -> Self {
        Self::new(if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a value using the configured format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails (JSON format only).
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes any serializable value as pretty JSON, regardless of format.
    ///
    /// Used for documents that have no table view.
    pub fn write_raw<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        write_json(value)
    }
}

/// Types with a human-readable terminal rendering.
///
/// Types written through an [`OutputWriter`] must also implement
/// [`Serialize`] for the JSON format.
pub trait TableOutput {
    /// Renders the value to stdout.
    ///
    /// # Parameters
    ///
    /// * `color` - Whether color output is enabled
    fn print_table(&self, color: bool);
}

/// Pretty-prints `value` as JSON to stdout.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints a bold header with a dashed underline.
///
/// ```text
/// 118.25.6.39
/// -----------
/// ```
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(console::measure_text_width(text)));
}

/// Prints a `key: value` line, dimming the key when color is enabled.
///
/// Keys are padded to a common width so that consecutive fields line up.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    let label = format!("{:<18}", format!("{key}:"));
    if color {
        println!("{} {}", style(label).dim(), value);
    } else {
        println!("{} {}", label, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_json_flag() {
        assert_eq!(OutputWriter::from_json_flag(true).format(), OutputFormat::Json);
        assert_eq!(OutputWriter::from_json_flag(false).format(), OutputFormat::Table);
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}
