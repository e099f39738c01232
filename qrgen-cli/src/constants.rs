// ABOUTME: Centralized constants for the qrgen CLI application
// ABOUTME: Contains environment variable names, config locations and widget markup names

/// Environment variables read by the CLI
pub mod env {
    /// Overrides the rendering endpoint
    pub const API_URL: &str = "QRGEN_API_URL";

    /// Suppresses download progress bars
    pub const QUIET: &str = "QRGEN_QUIET";

    /// Largest image accepted, e.g. `10MB`, `500KB`
    pub const MAX_IMAGE_SIZE: &str = "QRGEN_MAX_IMAGE_SIZE";

    /// Forces an inline image protocol: kitty, iterm2 or none
    pub const FORCE_PROTOCOL: &str = "QRGEN_FORCE_PROTOCOL";
}

/// Configuration file locations
pub mod config {
    /// Project-local config file name
    pub const PROJECT_FILE: &str = "qrgen.toml";

    /// Directory under the user config home
    pub const APP_DIR: &str = "qrgen";

    /// File name inside the config directory
    pub const CONFIG_FILE: &str = "config.toml";
}

/// Class names and texts of the embeddable widget markup
pub mod widget {
    pub const IMG_CONTAINER_CLASS: &str = "qr_code_img_container";
    pub const IMG_CLASS: &str = "qr_code_img";
    pub const FORM_CONTAINER_CLASS: &str = "qr_code_form_container";
    pub const INPUT_CLASS: &str = "qr_code_input";
    pub const BUTTON_CLASS: &str = "qr_code_button";

    pub const INPUT_PLACEHOLDER: &str = "Enter url";
    pub const BUTTON_LABEL: &str = "Generate QR Code";
}

/// Timeout configurations for various operations
pub mod timeouts {
    /// Progress bar tick interval for smooth animation
    pub const PROGRESS_BAR_TICK_MS: u64 = 80;
}
