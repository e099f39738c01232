// ABOUTME: Turns user input into a rendered QR image reference with label and format
// ABOUTME: Rejects input that is not an absolute URL before any request URL is produced

use crate::constants::labels::ALT_PREFIX;
use crate::error::QrError;
use crate::options::{Format, QrOptions};
use crate::url_builder::RequestUrlBuilder;
use serde::Serialize;
use url::Url;

/// The image reference produced for one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedCode {
    /// Request URL of the rendered image
    pub src: String,
    /// Human readable label, e.g. `qr code example`
    pub alt: String,
    pub format: Format,
}

impl GeneratedCode {
    /// Suggested file name: the alt text with dashes, plus the format extension
    pub fn download_filename(&self) -> String {
        format!("{}.{}", self.alt.replace(' ', "-"), self.format.extension())
    }
}

#[derive(Debug, Clone, Default)]
pub struct QrGenerator {
    options: Option<QrOptions>,
    builder: RequestUrlBuilder,
}

impl QrGenerator {
    pub fn new(options: Option<QrOptions>) -> Self {
        Self {
            options,
            builder: RequestUrlBuilder::new(),
        }
    }

    pub fn with_builder(mut self, builder: RequestUrlBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn generate(&self, input: &str) -> Result<GeneratedCode, QrError> {
        let parsed = Url::parse(input).map_err(|e| QrError::invalid_input(input, e))?;

        let request = self.builder.build(self.options.as_ref(), input);
        let label = derive_label(&parsed);

        let alt = if label.is_empty() {
            ALT_PREFIX.to_string()
        } else {
            format!("{} {}", ALT_PREFIX, label)
        };

        log::debug!("Generated {} for {}", request.url, input);

        Ok(GeneratedCode {
            src: request.url,
            alt,
            format: request.format,
        })
    }
}

/// First DNS label of the host, ignoring a leading `www.`
pub fn derive_label(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);

    host.split('.').next().unwrap_or_default().to_string()
}
