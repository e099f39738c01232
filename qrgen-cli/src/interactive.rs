// ABOUTME: Interactive prompts standing in for the widget form on a terminal
// ABOUTME: Asks for the URL to encode and confirms overwriting existing images

use anyhow::{Context, Result, anyhow};
use dialoguer::{Confirm, Input};
use std::io::IsTerminal;
use std::path::Path;
use url::Url;

use crate::constants::widget::INPUT_PLACEHOLDER;

pub struct InteractivePrompter {
    is_tty: bool,
}

impl InteractivePrompter {
    pub fn new() -> Self {
        let is_tty = std::io::stdin().is_terminal() && std::io::stderr().is_terminal();
        Self { is_tty }
    }

    /// Check if interactive prompts should be used
    pub fn should_prompt(&self) -> bool {
        self.is_tty && !self.is_in_ci()
    }

    /// Check if running in CI environment
    pub fn is_in_ci(&self) -> bool {
        std::env::var("CI").is_ok()
            || std::env::var("GITHUB_ACTIONS").is_ok()
            || std::env::var("JENKINS_URL").is_ok()
            || std::env::var("BUILDKITE").is_ok()
    }

    /// Test helper to override TTY detection
    #[cfg(test)]
    pub fn with_tty_override(mut self, is_tty: bool) -> Self {
        self.is_tty = is_tty;
        self
    }

    /// Ask for the URL to encode, re-asking until it parses
    pub fn prompt_data(&self) -> Result<String> {
        if !self.should_prompt() {
            return Err(anyhow!(
                "No URL given and interactive prompts are not available. Pass the URL as an argument"
            ));
        }

        let data: String = Input::new()
            .with_prompt(INPUT_PLACEHOLDER)
            .validate_with(|input: &String| -> Result<(), String> {
                validate_data(input)
            })
            .interact_text()
            .context("Failed to read URL")?;

        Ok(data.trim().to_string())
    }

    /// Ask before replacing an existing file; without a terminal the answer is yes
    pub fn confirm_overwrite(&self, path: &Path) -> Result<bool> {
        if !path.exists() || !self.should_prompt() {
            return Ok(true);
        }

        Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(true)
            .interact()
            .context("Failed to read confirmation")
    }
}

impl Default for InteractivePrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_data(input: &str) -> Result<(), String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    Url::parse(input)
        .map(|_| ())
        .map_err(|e| format!("Not an absolute URL: {}", e))
}
