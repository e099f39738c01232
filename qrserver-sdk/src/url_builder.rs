// ABOUTME: Builds request URLs for the qrserver.com rendering endpoint
// ABOUTME: Validated options become query parameters; the data payload is form-encoded

use crate::constants::urls::QRSERVER_API_BASE;
use crate::options::{Format, QrOptions, Quirks, ValidatedOptions};
use std::fmt::Write;
use url::form_urlencoded;

/// A composed request URL and the format the service will answer with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltRequest {
    pub url: String,
    pub format: Format,
}

#[derive(Debug, Clone)]
pub struct RequestUrlBuilder {
    base: String,
    quirks: Quirks,
}

impl Default for RequestUrlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestUrlBuilder {
    pub fn new() -> Self {
        Self {
            base: QRSERVER_API_BASE.to_string(),
            quirks: Quirks::default(),
        }
    }

    /// Point the builder at another endpoint (a mirror, or a test server)
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// Compose the request URL for `data`
    ///
    /// Invalid options are left out so the service falls back to its own
    /// defaults. No network traffic happens here.
    pub fn build(&self, options: Option<&QrOptions>, data: &str) -> BuiltRequest {
        let validated = options
            .map(|options| options.validate(self.quirks))
            .unwrap_or_default();

        self.build_validated(&validated, data)
    }

    pub fn build_validated(&self, validated: &ValidatedOptions, data: &str) -> BuiltRequest {
        let mut url = format!("{}?", self.base);

        // Writing into a String cannot fail
        if let Some(format) = validated.format {
            let _ = write!(url, "&format={}", format);
        }
        if let Some(size) = validated.size {
            let _ = write!(url, "&size={size}x{size}");
        }
        if let Some(color) = &validated.color {
            let _ = write!(url, "&color={}", color);
        }
        if let Some(bgcolor) = &validated.bgcolor {
            let _ = write!(url, "&bgcolor={}", bgcolor);
        }
        if let Some(margin) = validated.margin {
            let key = if self.quirks.margin_as_bgcolor {
                "bgcolor"
            } else {
                "margin"
            };
            let _ = write!(url, "&{}={}", key, margin);
        }
        if let Some(qzone) = validated.qzone {
            let _ = write!(url, "&qzone={}", qzone);
        }

        url.push_str("&data=");
        url.extend(form_urlencoded::byte_serialize(data.as_bytes()));

        BuiltRequest {
            url,
            format: validated.resolved_format(),
        }
    }
}

/// Build a request URL against the public endpoint with default behavior
pub fn build_request_url(options: Option<&QrOptions>, data: &str) -> String {
    RequestUrlBuilder::new().build(options, data).url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(size: i64, color: &str, format: &str) -> QrOptions {
        QrOptions {
            size: Some(size),
            color: Some(color.to_string()),
            format: Some(format.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_options() {
        assert_eq!(
            build_request_url(None, "hello"),
            "https://api.qrserver.com/v1/create-qr-code/?&data=hello"
        );
    }

    #[test]
    fn test_empty_options_match_no_options() {
        assert_eq!(
            build_request_url(Some(&QrOptions::default()), "hello"),
            build_request_url(None, "hello")
        );
    }

    #[test]
    fn test_parameter_order() {
        let request = RequestUrlBuilder::new().build(Some(&options(150, "255-0-0", "jpeg")), "hello");

        assert!(
            request
                .url
                .contains("&format=jpeg&size=150x150&color=255-0-0&data=hello")
        );
        assert_eq!(request.format, Format::Jpeg);
    }

    #[test]
    fn test_all_parameters() {
        let options = QrOptions {
            size: Some(200),
            color: Some("000".to_string()),
            bgcolor: Some("ffffff".to_string()),
            margin: Some(10),
            qzone: Some(4),
            format: Some("svg".to_string()),
        };

        assert_eq!(
            build_request_url(Some(&options), "hi"),
            "https://api.qrserver.com/v1/create-qr-code/?&format=svg&size=200x200&color=000&bgcolor=ffffff&margin=10&qzone=4&data=hi"
        );
    }

    #[test]
    fn test_margin_uses_its_own_parameter() {
        let options = QrOptions {
            margin: Some(10),
            ..Default::default()
        };

        let url = build_request_url(Some(&options), "x");
        assert!(url.contains("&margin=10"));
        assert!(!url.contains("bgcolor"));
    }

    #[test]
    fn test_legacy_quirks_send_margin_as_bgcolor() {
        let options = QrOptions {
            bgcolor: Some("0000ff".to_string()),
            margin: Some(10),
            ..Default::default()
        };

        let url = RequestUrlBuilder::new()
            .with_quirks(Quirks::legacy())
            .build(Some(&options), "x")
            .url;

        assert!(url.ends_with("&bgcolor=0000ff&bgcolor=10&data=x"));
        assert!(!url.contains("margin"));
    }

    #[test]
    fn test_invalid_options_are_dropped() {
        let options = QrOptions {
            size: Some(2_000),
            color: Some("blue".to_string()),
            qzone: Some(101),
            format: Some("bmp".to_string()),
            ..Default::default()
        };

        let request = RequestUrlBuilder::new().build(Some(&options), "x");
        assert_eq!(
            request.url,
            "https://api.qrserver.com/v1/create-qr-code/?&data=x"
        );
        assert_eq!(request.format, Format::Png);
    }

    #[test]
    fn test_vector_format_raises_size_ceiling() {
        let request = RequestUrlBuilder::new().build(Some(&options(5_000, "000", "eps")), "x");
        assert!(request.url.contains("&size=5000x5000"));

        let request = RequestUrlBuilder::new().build(Some(&options(5_000, "000", "png")), "x");
        assert!(!request.url.contains("size="));
    }

    #[test]
    fn test_data_is_form_encoded() {
        let url = build_request_url(None, "https://example.com/a b?c=d&e");
        assert!(url.ends_with("&data=https%3A%2F%2Fexample.com%2Fa+b%3Fc%3Dd%26e"));
    }

    #[test]
    fn test_custom_base() {
        let builder = RequestUrlBuilder::new().with_base("http://127.0.0.1:1234/render");
        assert_eq!(builder.base(), "http://127.0.0.1:1234/render");
        assert_eq!(
            builder.build(None, "x").url,
            "http://127.0.0.1:1234/render?&data=x"
        );
    }
}
