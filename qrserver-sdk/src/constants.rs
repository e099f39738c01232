// ABOUTME: Centralized constants for the qrserver SDK
// ABOUTME: Contains API endpoint, option ranges, retry configuration and timeouts

/// qrserver.com API URLs
pub mod urls {
    /// Rendering endpoint; options and data are appended as a query string
    pub const QRSERVER_API_BASE: &str = "https://api.qrserver.com/v1/create-qr-code/";
}

/// Accepted ranges for the rendering options
pub mod limits {
    /// Smallest accepted edge length in pixels
    pub const MIN_SIZE: i64 = 10;

    /// Largest edge length for raster formats
    pub const MAX_RASTER_SIZE: i64 = 1_000;

    /// Largest edge length for vector formats (svg, eps)
    pub const MAX_VECTOR_SIZE: i64 = 1_000_000;

    pub const MIN_MARGIN: i64 = 0;
    pub const MAX_MARGIN: i64 = 50;

    pub const MIN_QZONE: i64 = 0;
    pub const MAX_QZONE: i64 = 100;

    /// Bounds of a single component of a decimal `r-g-b` color
    pub const MIN_COLOR_COMPONENT: i64 = 0;
    pub const MAX_COLOR_COMPONENT: i64 = 255;
}

/// Retry configuration constants
pub mod retry {
    use std::time::Duration;

    /// Maximum number of retry attempts
    pub const MAX_RETRIES: u32 = 3;

    /// Initial delay before first retry
    pub const INITIAL_DELAY: Duration = Duration::from_millis(100);

    /// Maximum delay between retries
    pub const MAX_DELAY: Duration = Duration::from_secs(10);

    /// Backoff multiplier for exponential backoff
    pub const BACKOFF_MULTIPLIER: f64 = 2.0;
}

/// HTTP and request settings
pub mod http {
    use std::time::Duration;

    /// Default timeout for HTTP requests
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Largest image body accepted by default (10 MiB)
    pub const MAX_IMAGE_SIZE: u64 = 10 * 1024 * 1024;

    pub const USER_AGENT: &str = concat!("qrgen/", env!("CARGO_PKG_VERSION"));

    /// Redirects followed before giving up
    pub const MAX_REDIRECTS: usize = 3;
}

/// Labels used when naming generated images
pub mod labels {
    /// Prefix of the alt text of every generated image
    pub const ALT_PREFIX: &str = "qr code";
}
