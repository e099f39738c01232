// ABOUTME: Downloads rendered QR images with a progress bar and saves them to disk
// ABOUTME: Verifies the payload matches the requested format before anything is written

use crate::constants;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use qrserver_sdk::client::read_body_with_limit;
use qrserver_sdk::constants::http::MAX_IMAGE_SIZE;
use qrserver_sdk::{GeneratedCode, QrClient, save_image, verify_payload};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct ImageDownloader {
    client: QrClient,
    show_progress: bool,
}

impl ImageDownloader {
    pub fn new() -> Result<Self> {
        let max_image_size = parse_size_env(constants::env::MAX_IMAGE_SIZE, MAX_IMAGE_SIZE);
        let client = QrClient::builder()
            .max_image_size(max_image_size)
            .build()
            .context("Failed to create HTTP client")?;

        // Progress only on a TTY and when not in quiet mode
        let show_progress =
            std::io::stderr().is_terminal() && std::env::var(constants::env::QUIET).is_err();

        Ok(Self::with_client(client).with_progress(show_progress))
    }

    pub fn with_client(client: QrClient) -> Self {
        Self {
            client,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn max_image_size(&self) -> u64 {
        self.client.max_image_size()
    }

    /// Fetch the image behind `code` into memory and check it matches `code.format`.
    ///
    /// Without a progress bar the whole fetch is retried by the SDK; with one,
    /// only the request up to the response headers is.
    pub async fn fetch(&self, code: &GeneratedCode) -> Result<Vec<u8>> {
        let bytes = if self.show_progress {
            self.fetch_with_progress(code).await?
        } else {
            self.client.fetch_image(&code.src).await?
        };

        verify_payload(&bytes, code.format)?;
        Ok(bytes)
    }

    /// Fetch the image and save it under its suggested file name in `dest_dir`
    pub async fn download(&self, code: &GeneratedCode, dest_dir: &Path) -> Result<PathBuf> {
        if self.show_progress {
            let bytes = self.fetch(code).await?;
            return self.save(code, &bytes, dest_dir).await;
        }

        let path = qrserver_sdk::download(&self.client, &code.src, &code.download_filename(), dest_dir)
            .await?;
        Ok(path)
    }

    pub async fn save(&self, code: &GeneratedCode, bytes: &[u8], dest_dir: &Path) -> Result<PathBuf> {
        let path = save_image(bytes, dest_dir, &code.download_filename())
            .await
            .with_context(|| format!("Failed to save image in {}", dest_dir.display()))?;
        Ok(path)
    }

    async fn fetch_with_progress(&self, code: &GeneratedCode) -> Result<Vec<u8>> {
        let response = self.client.open_image(&code.src).await?;

        let filename = code.download_filename();
        let progress_bar = self.progress_bar(response.content_length(), &filename);

        let result = read_body_with_limit(response, self.client.max_image_size(), |read| {
            if let Some(ref pb) = progress_bar {
                pb.set_position(read);
            }
        })
        .await;

        match result {
            Ok(bytes) => {
                if let Some(pb) = progress_bar {
                    pb.finish_with_message(format!(
                        "Downloaded {} ({})",
                        filename,
                        format_bytes(bytes.len())
                    ));
                }
                Ok(bytes)
            }
            Err(e) => {
                if let Some(pb) = progress_bar {
                    pb.abandon_with_message(format!("Download of {} failed", filename));
                }
                Err(e.into())
            }
        }
    }

    fn progress_bar(&self, content_length: Option<u64>, filename: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = match content_length {
            Some(total) => {
                let pb = ProgressBar::new(total);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("{msg} [{bar:25.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
                {
                    pb.set_style(style.progress_chars("=>-"));
                }
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} {bytes}") {
                    pb.set_style(style);
                }
                pb.enable_steady_tick(Duration::from_millis(
                    constants::timeouts::PROGRESS_BAR_TICK_MS,
                ));
                pb
            }
        };

        pb.set_message(format!("Downloading {}", filename));
        Some(pb)
    }
}

/// Parse a size such as `10MB`, `500KB` or `2048` from an environment variable
pub fn parse_size_env(env_var: &str, default: u64) -> u64 {
    let Ok(size_str) = std::env::var(env_var) else {
        return default;
    };

    parse_size(&size_str).unwrap_or(default)
}

fn parse_size(size_str: &str) -> Option<u64> {
    let size_str = size_str.trim().to_uppercase();

    let (number_part, unit) = if let Some(number) = size_str.strip_suffix("GB") {
        (number, 1024 * 1024 * 1024)
    } else if let Some(number) = size_str.strip_suffix("MB") {
        (number, 1024 * 1024)
    } else if let Some(number) = size_str.strip_suffix("KB") {
        (number, 1024)
    } else {
        (size_str.as_str(), 1)
    };

    number_part.trim().parse::<u64>().ok()?.checked_mul(unit)
}

/// Format bytes in a human-readable way
pub fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
