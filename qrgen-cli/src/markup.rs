// ABOUTME: Renders the embeddable generator widget as static HTML
// ABOUTME: Keeps the fixed qr_code_* class names so existing stylesheets apply

use crate::constants::widget;
use qrserver_sdk::GeneratedCode;
use std::fmt::Write;

/// Widget markup for `container_id`, pre-filled with `code` and its input when given
pub fn render_widget(container_id: &str, data: Option<&str>, code: Option<&GeneratedCode>) -> String {
    let mut html = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(html, "<div id=\"{}\">", escape_html(container_id));

    let _ = writeln!(html, "  <div class=\"{}\">", widget::IMG_CONTAINER_CLASS);
    match code {
        Some(code) => {
            let _ = writeln!(
                html,
                "    <img class=\"{}\" src=\"{}\" alt=\"{}\" data-ext=\"{}\">",
                widget::IMG_CLASS,
                escape_html(&code.src),
                escape_html(&code.alt),
                code.format.extension()
            );
        }
        None => {
            let _ = writeln!(html, "    <img class=\"{}\" src=\"\" alt=\"\">", widget::IMG_CLASS);
        }
    }
    let _ = writeln!(html, "  </div>");

    let _ = writeln!(html, "  <div class=\"{}\">", widget::FORM_CONTAINER_CLASS);
    let value = data
        .map(|data| format!(" value=\"{}\"", escape_html(data)))
        .unwrap_or_default();
    let _ = writeln!(
        html,
        "    <input class=\"{}\" type=\"text\" spellcheck=\"false\" placeholder=\"{}\" autocomplete=\"off\"{}>",
        widget::INPUT_CLASS,
        widget::INPUT_PLACEHOLDER,
        value
    );
    let _ = writeln!(
        html,
        "    <button class=\"{}\" type=\"button\">{}</button>",
        widget::BUTTON_CLASS,
        widget::BUTTON_LABEL
    );
    let _ = writeln!(html, "  </div>");
    html.push_str("</div>\n");

    html
}

/// Escape text for use in element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrserver_sdk::QrGenerator;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(
            escape_html("<\"it's\">"),
            "&lt;&quot;it&#39;s&quot;&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_empty_widget() {
        let html = render_widget("qr_code", None, None);

        assert!(html.starts_with("<div id=\"qr_code\">"));
        for class in [
            widget::IMG_CONTAINER_CLASS,
            widget::IMG_CLASS,
            widget::FORM_CONTAINER_CLASS,
            widget::INPUT_CLASS,
            widget::BUTTON_CLASS,
        ] {
            assert!(html.contains(&format!("class=\"{}\"", class)), "missing {class}");
        }
        assert!(html.contains("placeholder=\"Enter url\""));
        assert!(html.contains(">Generate QR Code</button>"));
        assert!(html.contains("src=\"\" alt=\"\""));
        assert!(!html.contains("value="));
    }

    #[test]
    fn test_prefilled_widget() {
        let code = QrGenerator::new(None)
            .generate("https://www.example.com/?a=1&b=2")
            .unwrap();
        let html = render_widget("box", Some("https://www.example.com/?a=1&b=2"), Some(&code));

        assert!(html.contains("<div id=\"box\">"));
        assert!(html.contains("alt=\"qr code example\""));
        assert!(html.contains("data-ext=\"png\""));
        assert!(html.contains("value=\"https://www.example.com/?a=1&amp;b=2\""));
        // The request URL's own separators are escaped as well
        assert!(html.contains("create-qr-code/?&amp;data="));
    }

    #[test]
    fn test_container_id_is_escaped() {
        let html = render_widget("x\"><script>", None, None);
        assert!(html.starts_with("<div id=\"x&quot;&gt;&lt;script&gt;\">"));
    }
}
