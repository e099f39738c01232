// ABOUTME: CLI argument definitions for the qrgen application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Args, Parser, Subcommand};
use qrserver_sdk::QrOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qrgen")]
#[command(about = "Generate QR code images with the qrserver.com API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Force colored output even when piped
    #[arg(long, global = true, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Load configuration from this file only
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Rendering options; invalid values are dropped and the service default applies
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct QrArgs {
    /// Edge length in pixels (10-1000, or up to 1000000 for svg/eps)
    #[arg(long, allow_negative_numbers = true)]
    pub size: Option<i64>,

    /// Foreground color as hex (e.g. 000 or ff0000) or r-g-b (e.g. 255-0-0)
    #[arg(long)]
    pub color: Option<String>,

    /// Background color as hex or r-g-b
    #[arg(long)]
    pub bgcolor: Option<String>,

    /// Margin in pixels (0-50)
    #[arg(long, allow_negative_numbers = true)]
    pub margin: Option<i64>,

    /// Quiet zone in modules (0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub qzone: Option<i64>,

    /// Image format: png, gif, jpeg, jpg, svg or eps
    #[arg(long)]
    pub format: Option<String>,

    /// Reproduce the legacy widget's margin and color quirks
    #[arg(long)]
    pub legacy_quirks: bool,
}

impl QrArgs {
    pub fn to_options(&self) -> QrOptions {
        QrOptions {
            size: self.size,
            color: self.color.clone(),
            bgcolor: self.bgcolor.clone(),
            margin: self.margin,
            qzone: self.qzone,
            format: self.format.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the request URL for a URL or text
    Url {
        /// URL to encode
        data: String,

        #[command(flatten)]
        qr: QrArgs,
    },
    /// Generate a QR code and download the image
    Generate {
        /// URL to encode (prompted for when omitted on a terminal)
        data: Option<String>,

        #[command(flatten)]
        qr: QrArgs,

        /// Directory to save the image in
        #[arg(long, short, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Display the image inline (kitty and iTerm2 compatible terminals)
        #[arg(long)]
        show: bool,

        /// Only print the image reference, do not download
        #[arg(long, conflicts_with = "output_dir")]
        no_download: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Pretty print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// Show which options would be sent and which are dropped
    Inspect {
        #[command(flatten)]
        qr: QrArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Pretty print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// Print embeddable HTML markup for the generator widget
    Html {
        /// id of the container element
        #[arg(long, default_value = "qr_code")]
        container: String,

        /// URL to pre-render into the widget
        data: Option<String>,

        #[command(flatten)]
        qr: QrArgs,
    },
    /// Generate shell completions
    #[command(after_long_help = crate::completions::INSTALL_HELP)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "qrgen");

        for name in ["url", "generate", "inspect", "html", "completions"] {
            assert!(cli.find_subcommand(name).is_some(), "{name} should exist");
        }

        cli.debug_assert();
    }

    #[test]
    fn test_parse_url_command_with_options() {
        let cli = Cli::try_parse_from([
            "qrgen",
            "url",
            "https://example.com",
            "--size",
            "150",
            "--color",
            "255-0-0",
            "--format",
            "jpeg",
        ])
        .unwrap();

        match cli.command {
            Commands::Url { data, qr } => {
                assert_eq!(data, "https://example.com");
                assert_eq!(qr.size, Some(150));
                assert_eq!(qr.color, Some("255-0-0".to_string()));
                assert_eq!(qr.format, Some("jpeg".to_string()));
                assert!(!qr.legacy_quirks);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["qrgen", "generate"]).unwrap();

        match cli.command {
            Commands::Generate {
                data,
                qr,
                output_dir,
                show,
                no_download,
                json,
                pretty,
            } => {
                assert_eq!(data, None);
                assert_eq!(qr, QrArgs::default());
                assert_eq!(output_dir, None);
                assert!(!show);
                assert!(!no_download);
                assert!(!json);
                assert!(!pretty);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_pretty_requires_json() {
        assert!(Cli::try_parse_from(["qrgen", "inspect", "--pretty"]).is_err());
        assert!(Cli::try_parse_from(["qrgen", "inspect", "--json", "--pretty"]).is_ok());
    }

    #[test]
    fn test_no_download_conflicts_with_output_dir() {
        let result = Cli::try_parse_from([
            "qrgen",
            "generate",
            "https://example.com",
            "--no-download",
            "-o",
            "/tmp",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_integer_size_is_a_usage_error() {
        assert!(Cli::try_parse_from(["qrgen", "url", "https://example.com", "--size", "big"]).is_err());
    }

    #[test]
    fn test_html_container_default() {
        let cli = Cli::try_parse_from(["qrgen", "html"]).unwrap();
        match cli.command {
            Commands::Html {
                container, data, ..
            } => {
                assert_eq!(container, "qr_code");
                assert_eq!(data, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "qrgen",
            "inspect",
            "--verbose",
            "--no-color",
            "--config",
            "/tmp/qrgen.toml",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/qrgen.toml")));

        assert!(Cli::try_parse_from(["qrgen", "inspect", "--no-color", "--force-color"]).is_err());
    }

    #[test]
    fn test_negative_numbers_reach_validation() {
        let cli = Cli::try_parse_from(["qrgen", "inspect", "--margin", "-1"]).unwrap();
        match cli.command {
            Commands::Inspect { qr, .. } => assert_eq!(qr.margin, Some(-1)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_to_options() {
        let args = QrArgs {
            size: Some(200),
            margin: Some(4),
            format: Some("svg".to_string()),
            ..Default::default()
        };

        let options = args.to_options();
        assert_eq!(options.size, Some(200));
        assert_eq!(options.margin, Some(4));
        assert_eq!(options.format, Some("svg".to_string()));
        assert_eq!(options.color, None);
    }
}
