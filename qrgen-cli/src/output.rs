// ABOUTME: This module handles output formatting for the qrgen CLI
// ABOUTME: It renders option reports as colored tables or JSON and generated codes as JSON

use anyhow::Result;
use owo_colors::OwoColorize;
use qrserver_sdk::{GeneratedCode, QrOptions, Quirks};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// What happens to one option when the request URL is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionStatus {
    Sent,
    Dropped,
    Unset,
}

impl std::fmt::Display for OptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            OptionStatus::Sent => "sent",
            OptionStatus::Dropped => "dropped",
            OptionStatus::Unset => "unset",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionRow {
    pub name: &'static str,
    pub value: Option<String>,
    pub status: OptionStatus,
    /// Query parameter as it appears in the request URL
    pub parameter: Option<String>,
}

/// Report every option with its raw value and fate
pub fn option_report(options: &QrOptions, quirks: Quirks) -> Vec<OptionRow> {
    let validated = options.validate(quirks);

    let margin_key = if quirks.margin_as_bgcolor {
        "bgcolor"
    } else {
        "margin"
    };

    vec![
        row(
            "format",
            options.format.clone(),
            validated.format.map(|f| format!("format={}", f)),
        ),
        row(
            "size",
            options.size.map(|s| s.to_string()),
            validated.size.map(|s| format!("size={s}x{s}")),
        ),
        row(
            "color",
            options.color.clone(),
            validated.color.as_ref().map(|c| format!("color={}", c)),
        ),
        row(
            "bgcolor",
            options.bgcolor.clone(),
            validated.bgcolor.as_ref().map(|c| format!("bgcolor={}", c)),
        ),
        row(
            "margin",
            options.margin.map(|m| m.to_string()),
            validated.margin.map(|m| format!("{}={}", margin_key, m)),
        ),
        row(
            "qzone",
            options.qzone.map(|q| q.to_string()),
            validated.qzone.map(|q| format!("qzone={}", q)),
        ),
    ]
}

fn row(name: &'static str, value: Option<String>, parameter: Option<String>) -> OptionRow {
    let status = match (&value, &parameter) {
        (_, Some(_)) => OptionStatus::Sent,
        (Some(_), None) => OptionStatus::Dropped,
        (None, None) => OptionStatus::Unset,
    };

    OptionRow {
        name,
        value,
        status,
        parameter,
    }
}

/// Result of `qrgen generate` in machine readable form
#[derive(Debug, Serialize)]
pub struct GenerateReport<'a> {
    #[serde(flatten)]
    pub code: &'a GeneratedCode,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<PathBuf>,
}

impl<'a> GenerateReport<'a> {
    pub fn new(code: &'a GeneratedCode, saved_to: Option<&Path>) -> Self {
        Self {
            code,
            filename: code.download_filename(),
            saved_to: saved_to.map(Path::to_path_buf),
        }
    }
}

pub trait OutputFormat {
    fn format_options(&self, rows: &[OptionRow]) -> Result<String>;
}

pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn format_status(&self, status: OptionStatus) -> String {
        if !self.use_color {
            return status.to_string();
        }

        match status {
            OptionStatus::Sent => status.to_string().green().to_string(),
            OptionStatus::Dropped => status.to_string().red().to_string(),
            OptionStatus::Unset => status.to_string().dimmed().to_string(),
        }
    }

    fn format_optional(&self, value: &Option<String>) -> String {
        match value {
            Some(value) => value.clone(),
            None if self.use_color => "-".dimmed().to_string(),
            None => "-".to_string(),
        }
    }
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Option")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Parameter")]
    parameter: String,
}

impl OutputFormat for TableFormatter {
    fn format_options(&self, rows: &[OptionRow]) -> Result<String> {
        let rows: Vec<TableRow> = rows
            .iter()
            .map(|row| TableRow {
                name: row.name.to_string(),
                value: self.format_optional(&row.value),
                status: self.format_status(row.status),
                parameter: self.format_optional(&row.parameter),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn format_generated(&self, report: &GenerateReport<'_>) -> Result<String> {
        self.to_json(report)
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_options(&self, rows: &[OptionRow]) -> Result<String> {
        self.to_json(rows)
    }
}
