// ABOUTME: Inline display of rendered QR images in kitty and iTerm2 compatible terminals
// ABOUTME: Picks a protocol from the detected terminal capabilities

use anyhow::Result;
use qrserver_sdk::Format;

pub trait ImageProtocol {
    /// Render image data as terminal escape sequence
    fn render_image(&self, data: &[u8], format: Format, name: &str) -> Result<String>;

    /// Formats the protocol can show, possibly after conversion
    fn supports_format(&self, format: Format) -> bool;
}

pub mod detection;
pub mod iterm2;
pub mod kitty;

pub use detection::{Protocol, TerminalCapabilities};
pub use iterm2::ITerm2Protocol;
pub use kitty::KittyProtocol;

/// Escape sequence showing `data` inline, or `None` when the terminal or format cannot
pub fn render_inline(
    capabilities: &TerminalCapabilities,
    data: &[u8],
    format: Format,
    name: &str,
) -> Result<Option<String>> {
    let protocol: Box<dyn ImageProtocol> = match capabilities.preferred_protocol() {
        Some(Protocol::Kitty) => Box::new(KittyProtocol),
        Some(Protocol::ITerm2) => Box::new(ITerm2Protocol),
        None => {
            log::debug!(
                "Terminal {} has no inline image support",
                capabilities.terminal_name
            );
            return Ok(None);
        }
    };

    if !protocol.supports_format(format) {
        log::debug!("Cannot display {} images inline", format);
        return Ok(None);
    }

    protocol.render_image(data, format, name).map(Some)
}
