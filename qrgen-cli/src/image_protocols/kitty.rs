// ABOUTME: Kitty terminal graphics protocol implementation
// ABOUTME: Sends PNG data in base64 chunks, converting gif and jpeg codes first

use super::ImageProtocol;
use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use qrserver_sdk::Format;
use std::io::Cursor;

/// Base64 payload bytes per escape sequence, a multiple of 4
const CHUNK_SIZE: usize = 4096;

pub struct KittyProtocol;

impl ImageProtocol for KittyProtocol {
    fn render_image(&self, data: &[u8], format: Format, _name: &str) -> Result<String> {
        let png = match format {
            Format::Png => data.to_vec(),
            _ => convert_to_png(data)?,
        };

        let base64_data = STANDARD.encode(&png);
        let chunks: Vec<&[u8]> = base64_data.as_bytes().chunks(CHUNK_SIZE).collect();

        let mut output = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let more = if i + 1 == chunks.len() { 0 } else { 1 };
            let chunk = String::from_utf8_lossy(chunk);

            if i == 0 {
                output.push_str(&format!("\x1b_Ga=T,f=100,m={};{}\x1b\\", more, chunk));
            } else {
                output.push_str(&format!("\x1b_Gm={};{}\x1b\\", more, chunk));
            }
        }

        output.push('\n');
        Ok(output)
    }

    fn supports_format(&self, format: Format) -> bool {
        !format.is_vector()
    }
}

fn convert_to_png(data: &[u8]) -> Result<Vec<u8>> {
    let image = image::load_from_memory(data).context("Failed to decode image")?;

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .context("Failed to convert image to PNG")?;
    Ok(png)
}
