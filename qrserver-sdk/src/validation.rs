// ABOUTME: Pure validators for every rendering option accepted by the QR service
// ABOUTME: Invalid values are reported as false so callers can silently drop them

use crate::constants::limits;
use crate::options::{Format, QrOptions, Quirks, ValidatedOptions};
use once_cell::sync::Lazy;
use regex::Regex;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("valid regex"));

static HEX_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9A-Fa-f]{3}").expect("valid regex"));

/// Inclusive range check shared by every numeric option
pub fn valid_decimal(value: i64, min: i64, max: i64) -> bool {
    value >= min && value <= max
}

/// Edge length in pixels; vector formats allow a far larger ceiling
pub fn valid_size(size: i64, format: Option<Format>) -> bool {
    let max = format.unwrap_or_default().max_size();
    valid_decimal(size, limits::MIN_SIZE, max)
}

/// A 3 or 6 digit hex color, or a decimal `r-g-b` triplet
pub fn valid_color(color: &str) -> bool {
    HEX_COLOR.is_match(color) || valid_rgb_triplet(color)
}

/// Legacy widget matcher: any string containing three hex digits passes
pub fn valid_color_substring(color: &str) -> bool {
    HEX_RUN.is_match(color) || valid_rgb_triplet(color)
}

fn valid_rgb_triplet(color: &str) -> bool {
    let components: Vec<&str> = color.split('-').collect();

    components.len() == 3
        && components.iter().all(|component| {
            !component.is_empty()
                && component.len() <= 3
                && component.bytes().all(|b| b.is_ascii_digit())
                && component.parse::<i64>().is_ok_and(|value| {
                    valid_decimal(
                        value,
                        limits::MIN_COLOR_COMPONENT,
                        limits::MAX_COLOR_COMPONENT,
                    )
                })
        })
}

pub fn valid_margin(margin: i64) -> bool {
    valid_decimal(margin, limits::MIN_MARGIN, limits::MAX_MARGIN)
}

pub fn valid_qzone(qzone: i64) -> bool {
    valid_decimal(qzone, limits::MIN_QZONE, limits::MAX_QZONE)
}

pub fn parse_format(format: &str) -> Option<Format> {
    format.parse().ok()
}

/// Keep the well-formed options, resolving the format first
///
/// The format has to be known before `size` is checked because it decides
/// the size ceiling.
pub fn validate_options(options: &QrOptions, quirks: Quirks) -> ValidatedOptions {
    let color_ok = |color: &String| {
        if quirks.substring_hex {
            valid_color_substring(color)
        } else {
            valid_color(color)
        }
    };

    let format = options.format.as_deref().and_then(parse_format);

    let validated = ValidatedOptions {
        format,
        size: options.size.filter(|&size| valid_size(size, format)),
        color: options.color.clone().filter(color_ok),
        bgcolor: options.bgcolor.clone().filter(color_ok),
        margin: options.margin.filter(|&margin| valid_margin(margin)),
        qzone: options.qzone.filter(|&qzone| valid_qzone(qzone)),
    };

    log_dropped(options, &validated);
    validated
}

fn log_dropped(options: &QrOptions, validated: &ValidatedOptions) {
    if options.format.is_some() && validated.format.is_none() {
        log::debug!("Dropping invalid format {:?}", options.format);
    }
    if options.size.is_some() && validated.size.is_none() {
        log::debug!("Dropping invalid size {:?}", options.size);
    }
    if options.color.is_some() && validated.color.is_none() {
        log::debug!("Dropping invalid color {:?}", options.color);
    }
    if options.bgcolor.is_some() && validated.bgcolor.is_none() {
        log::debug!("Dropping invalid bgcolor {:?}", options.bgcolor);
    }
    if options.margin.is_some() && validated.margin.is_none() {
        log::debug!("Dropping invalid margin {:?}", options.margin);
    }
    if options.qzone.is_some() && validated.qzone.is_none() {
        log::debug!("Dropping invalid qzone {:?}", options.qzone);
    }
}
