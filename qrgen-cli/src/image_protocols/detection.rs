// ABOUTME: Terminal capability detection for inline image display
// ABOUTME: Honors QRGEN_FORCE_PROTOCOL before inspecting terminal environment variables

use crate::constants;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Kitty,
    ITerm2,
}

#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub supports_kitty_images: bool,
    pub supports_iterm2_images: bool,
    pub terminal_name: String,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        if let Ok(forced_protocol) = env::var(constants::env::FORCE_PROTOCOL) {
            return Self::forced(&forced_protocol);
        }

        Self::detect_without_override()
    }

    /// Capabilities for an explicit protocol name: kitty, iterm2 or none
    pub fn forced(protocol: &str) -> Self {
        let terminal_name = format!("forced-{}", protocol);

        match protocol.to_lowercase().as_str() {
            "kitty" => Self {
                supports_kitty_images: true,
                supports_iterm2_images: false,
                terminal_name,
            },
            "iterm2" => Self {
                supports_kitty_images: false,
                supports_iterm2_images: true,
                terminal_name,
            },
            "none" | "disable" | "disabled" => Self {
                supports_kitty_images: false,
                supports_iterm2_images: false,
                terminal_name,
            },
            _ => {
                log::warn!(
                    "Unknown protocol '{}' in {}. Valid values: kitty, iterm2, none",
                    protocol,
                    constants::env::FORCE_PROTOCOL
                );
                Self::detect_without_override()
            }
        }
    }

    fn detect_without_override() -> Self {
        let term_program = env::var("TERM_PROGRAM").unwrap_or_default();
        let term = env::var("TERM").unwrap_or_default();
        let wezterm_exe = env::var("WEZTERM_EXECUTABLE").ok();
        let kitty_window_id = env::var("KITTY_WINDOW_ID").ok();

        Self {
            supports_kitty_images: detect_kitty_support(
                &term_program,
                &term,
                wezterm_exe.is_some(),
                kitty_window_id.is_some(),
            ),
            supports_iterm2_images: detect_iterm2_support(&term_program, &term),
            terminal_name: determine_terminal_name(&term_program, &term),
        }
    }

    pub fn supports_inline_images(&self) -> bool {
        self.supports_kitty_images || self.supports_iterm2_images
    }

    /// Kitty wins when both are available
    pub fn preferred_protocol(&self) -> Option<Protocol> {
        if self.supports_kitty_images {
            Some(Protocol::Kitty)
        } else if self.supports_iterm2_images {
            Some(Protocol::ITerm2)
        } else {
            None
        }
    }
}

fn detect_kitty_support(
    term_program: &str,
    term: &str,
    in_wezterm: bool,
    in_kitty_window: bool,
) -> bool {
    if term_program == "kitty" || in_kitty_window {
        return true;
    }

    if term_program == "WezTerm" || in_wezterm || term_program == "ghostty" {
        return true;
    }

    term.contains("kitty") || term.contains("ghostty")
}

fn detect_iterm2_support(term_program: &str, term: &str) -> bool {
    if matches!(
        term_program,
        "iTerm.app" | "WezTerm" | "mintty" | "Hyper" | "Warp" | "Tabby"
    ) {
        return true;
    }

    term.contains("iterm")
}

fn determine_terminal_name(term_program: &str, term: &str) -> String {
    if !term_program.is_empty() {
        term_program.to_string()
    } else if !term.is_empty() {
        term.to_string()
    } else {
        "unknown".to_string()
    }
}
