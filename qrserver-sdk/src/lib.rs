// ABOUTME: qrserver SDK library: option validation, request URLs and image download
// ABOUTME: Talks to the api.qrserver.com rendering endpoint; no QR encoding happens locally

pub mod builder;
pub mod client;
pub mod constants;
pub mod download;
pub mod error;
pub mod generator;
pub mod options;
pub mod retry;
pub mod url_builder;
pub mod validation;

pub use builder::QrClientConfig;
pub use client::QrClient;
pub use download::{download, sanitize_filename, save_image, verify_payload};
pub use error::QrError;
pub use generator::{GeneratedCode, QrGenerator, derive_label};
pub use options::{Format, QrOptions, Quirks, ValidatedOptions};
pub use url_builder::{BuiltRequest, RequestUrlBuilder, build_request_url};

pub type Result<T> = std::result::Result<T, QrError>;
