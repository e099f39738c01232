// ABOUTME: Rendering option model: raw user options, image formats and validated options
// ABOUTME: Raw options deserialize leniently so malformed values are dropped, not fatal

use crate::constants::limits;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image formats the rendering service can produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Png,
    Gif,
    Jpeg,
    Jpg,
    Svg,
    Eps,
}

impl Format {
    pub const ALL: [Format; 6] = [
        Format::Png,
        Format::Gif,
        Format::Jpeg,
        Format::Jpg,
        Format::Svg,
        Format::Eps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Gif => "gif",
            Format::Jpeg => "jpeg",
            Format::Jpg => "jpg",
            Format::Svg => "svg",
            Format::Eps => "eps",
        }
    }

    /// Vector formats allow much larger sizes
    pub fn is_vector(&self) -> bool {
        matches!(self, Format::Svg | Format::Eps)
    }

    /// Upper bound of the `size` option for this format
    pub fn max_size(&self) -> i64 {
        if self.is_vector() {
            limits::MAX_VECTOR_SIZE
        } else {
            limits::MAX_RASTER_SIZE
        }
    }

    /// File extension used when saving an image of this format
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Whether `bytes` look like an image of this format, judged by its leading bytes
    pub fn matches_payload(&self, bytes: &[u8]) -> bool {
        match self {
            Format::Png => bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            Format::Gif => bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a"),
            Format::Jpeg | Format::Jpg => bytes.starts_with(&[0xFF, 0xD8, 0xFF]),
            Format::Svg => {
                let head = &bytes[..bytes.len().min(1024)];
                String::from_utf8_lossy(head).contains("<svg")
            }
            Format::Eps => bytes.starts_with(b"%!PS"),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unsupported format '{}'. Supported formats: png, gif, jpeg, jpg, svg, eps",
            self.0
        )
    }
}

impl std::error::Error for UnknownFormat {}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Switches reproducing the behavior of the legacy browser widget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quirks {
    /// Send `margin` under the `bgcolor` parameter name
    pub margin_as_bgcolor: bool,
    /// Accept any color string that merely contains a run of hex digits
    pub substring_hex: bool,
}

impl Quirks {
    pub fn legacy() -> Self {
        Self {
            margin_as_bgcolor: true,
            substring_hex: true,
        }
    }

    pub fn from_flag(legacy: bool) -> Self {
        if legacy { Self::legacy() } else { Self::default() }
    }
}

/// Raw rendering options as supplied by the user
///
/// Nothing here is trusted. Values of the wrong type deserialize to `None`
/// and out-of-range values are dropped by [`QrOptions::validate`], letting
/// the rendering service apply its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrOptions {
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub margin: Option<i64>,
    #[serde(default, deserialize_with = "lenient_integer", skip_serializing_if = "Option::is_none")]
    pub qzone: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl QrOptions {
    pub fn is_empty(&self) -> bool {
        *self == QrOptions::default()
    }

    /// Merge with another set of options, giving precedence to the other
    pub fn merge(self, other: QrOptions) -> QrOptions {
        QrOptions {
            size: other.size.or(self.size),
            color: other.color.or(self.color),
            bgcolor: other.bgcolor.or(self.bgcolor),
            margin: other.margin.or(self.margin),
            qzone: other.qzone.or(self.qzone),
            format: other.format.or(self.format),
        }
    }

    /// Keep only the well-formed options
    pub fn validate(&self, quirks: Quirks) -> ValidatedOptions {
        crate::validation::validate_options(self, quirks)
    }
}

/// Options that passed validation and will be sent to the service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedOptions {
    pub format: Option<Format>,
    pub size: Option<i64>,
    pub color: Option<String>,
    pub bgcolor: Option<String>,
    pub margin: Option<i64>,
    pub qzone: Option<i64>,
}

impl ValidatedOptions {
    /// Format the service will render, falling back to its png default
    pub fn resolved_format(&self) -> Format {
        self.format.unwrap_or_default()
    }
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(value.and_then(|value| match value {
        serde_json::Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(value.and_then(|value| match value {
        serde_json::Value::String(text) => Some(text),
        _ => None,
    }))
}
