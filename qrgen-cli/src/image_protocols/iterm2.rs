// ABOUTME: iTerm2 terminal inline image protocol implementation
// ABOUTME: Sends the image file base64 encoded with its name and size

use super::ImageProtocol;
use anyhow::Result;
use base64::{Engine, engine::general_purpose::STANDARD};
use qrserver_sdk::Format;

pub struct ITerm2Protocol;

impl ImageProtocol for ITerm2Protocol {
    fn render_image(&self, data: &[u8], _format: Format, name: &str) -> Result<String> {
        // \x1b]1337;File=name=<b64 name>;size=<bytes>;inline=1:<b64 data>\x07
        Ok(format!(
            "\x1b]1337;File=name={};size={};inline=1:{}\x07\n",
            STANDARD.encode(name.as_bytes()),
            data.len(),
            STANDARD.encode(data)
        ))
    }

    fn supports_format(&self, format: Format) -> bool {
        matches!(
            format,
            Format::Png | Format::Gif | Format::Jpeg | Format::Jpg
        )
    }
}
