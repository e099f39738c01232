// ABOUTME: HTTP client for fetching rendered QR images from the rendering service
// ABOUTME: Checks status, content type and size limits, retrying transient failures

use crate::builder::QrClientConfig;
use crate::constants::http::MAX_REDIRECTS;
use crate::error::QrError;
use crate::retry::{RetryConfig, retry_with_backoff};
use futures_util::StreamExt;
use reqwest::Response;
use reqwest::header::CONTENT_TYPE;
use url::Url;

pub struct QrClient {
    http: reqwest::Client,
    retry: RetryConfig,
    max_image_size: u64,
}

impl QrClient {
    pub fn new() -> Result<Self, QrError> {
        Self::builder().build()
    }

    pub(crate) fn from_config(config: QrClientConfig) -> Result<Self, QrError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| QrError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let retry = RetryConfig {
            max_retries: config.max_retries,
            initial_delay: config.retry_delay,
            ..Default::default()
        };

        Ok(Self {
            http,
            retry,
            max_image_size: config.max_image_size,
        })
    }

    pub fn max_image_size(&self) -> u64 {
        self.max_image_size
    }

    /// Issue the GET for an image and return the response once its headers check out
    ///
    /// The body is left unread so callers can stream it. Retries stop at the
    /// headers: a failure while streaming the body is the caller's to handle.
    pub async fn open_image(&self, src: &str) -> Result<Response, QrError> {
        let url = parse_src(src)?;
        retry_with_backoff(&self.retry, || self.send(url.clone())).await
    }

    /// Fetch an image into memory, retrying the request and the body read together
    pub async fn fetch_image(&self, src: &str) -> Result<Vec<u8>, QrError> {
        let url = parse_src(src)?;
        retry_with_backoff(&self.retry, || {
            let url = url.clone();
            async move {
                let response = self.send(url).await?;
                read_body_with_limit(response, self.max_image_size, |_| {}).await
            }
        })
        .await
    }

    async fn send(&self, url: Url) -> Result<Response, QrError> {
        log::debug!("GET {}", url);

        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QrError::from_status(status.as_u16(), url.as_str()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok());
        if let Some(content_type) = content_type {
            if !is_image_content_type(content_type) {
                return Err(QrError::NotAnImage(content_type.to_string()));
            }
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_image_size {
                return Err(QrError::too_large(content_length, self.max_image_size));
            }
        }

        Ok(response)
    }
}

fn parse_src(src: &str) -> Result<Url, QrError> {
    Url::parse(src).map_err(|e| QrError::Configuration(format!("Invalid image URL '{}': {}", src, e)))
}

/// Read a response body, failing as soon as it grows past `max_size`
///
/// `on_progress` receives the number of bytes read so far after every chunk.
pub async fn read_body_with_limit<F>(
    response: Response,
    max_size: u64,
    mut on_progress: F,
) -> Result<Vec<u8>, QrError>
where
    F: FnMut(u64),
{
    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        bytes.extend_from_slice(&chunk);

        let read = bytes.len() as u64;
        on_progress(read);

        if read > max_size {
            return Err(QrError::too_large(read, max_size));
        }
    }

    Ok(bytes)
}

/// Content types the service answers with for the supported formats
pub fn is_image_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.starts_with("image/")
        || mime == "application/postscript"
        || mime == "application/octet-stream"
}
