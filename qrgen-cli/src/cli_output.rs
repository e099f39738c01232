// ABOUTME: User-facing stderr messages for qrgen with optional coloring
// ABOUTME: Reports errors with recovery hints, warnings and saved-file notices

use owo_colors::OwoColorize;
use qrserver_sdk::QrError;
use std::path::Path;

pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.format_labeled("error:", message, Tone::Red));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.format_labeled("warning:", message, Tone::Yellow));
    }

    pub fn info(&self, message: &str) {
        eprintln!("{}", self.format_labeled("info:", message, Tone::Blue));
    }

    pub fn success(&self, message: &str) {
        eprintln!("{}", self.format_labeled("success:", message, Tone::Green));
    }

    /// Display a progress/status message with an icon
    pub fn status(&self, icon: &str, message: &str) {
        if self.use_color {
            eprintln!("{} {}", icon.dimmed(), message);
        } else {
            eprintln!("{} {}", icon, message);
        }
    }

    /// Print an error chain, followed by a recovery hint when the SDK has one
    pub fn report(&self, error: &anyhow::Error) {
        self.error(&format!("{:#}", error));
        if let Some(help) = error.downcast_ref::<QrError>().and_then(QrError::help_text) {
            self.status("hint:", help);
        }
    }

    pub fn saved(&self, path: &Path) {
        self.success(&format!("Saved {}", path.display()));
    }

    fn format_labeled(&self, label: &str, message: &str, tone: Tone) -> String {
        if !self.use_color {
            return format!("{} {}", label, message);
        }

        let label = match tone {
            Tone::Red => label.red().bold().to_string(),
            Tone::Yellow => label.yellow().bold().to_string(),
            Tone::Blue => label.blue().bold().to_string(),
            Tone::Green => label.green().bold().to_string(),
        };
        format!("{} {}", label, message)
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Red,
    Yellow,
    Blue,
    Green,
}
