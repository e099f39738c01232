// ABOUTME: Main entry point for the qrgen application
// ABOUTME: Wires config, option merging and the SDK generator to the subcommands

use anyhow::Result;
use clap::Parser;
use qrserver_sdk::{GeneratedCode, QrGenerator, QrOptions, Quirks, RequestUrlBuilder, sanitize_filename};
use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;

use qrgen_cli::cli::{Cli, Commands, QrArgs};
use qrgen_cli::cli_output::CliOutput;
use qrgen_cli::completions::write_completions;
use qrgen_cli::config::Config;
use qrgen_cli::downloader::ImageDownloader;
use qrgen_cli::image_protocols::{TerminalCapabilities, render_inline};
use qrgen_cli::interactive::InteractivePrompter;
use qrgen_cli::markup::render_widget;
use qrgen_cli::output::{GenerateReport, JsonFormatter, OutputFormat, TableFormatter, option_report};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let use_color = should_use_color(&cli);
    let output = CliOutput::with_color(use_color);

    if let Err(e) = run(cli, use_color, &output).await {
        output.report(&e);
        std::process::exit(1);
    }
}

fn should_use_color(cli: &Cli) -> bool {
    if cli.no_color {
        return false;
    }
    if cli.force_color {
        return true;
    }

    env::var("NO_COLOR").is_err()
        && env::var("TERM").unwrap_or_default() != "dumb"
        && std::io::stdout().is_terminal()
}

/// Loaded config plus the option flags of one invocation
struct Settings {
    config: Config,
    options: Option<QrOptions>,
    quirks: Quirks,
}

impl Settings {
    fn new(config: Config, qr: &QrArgs) -> Self {
        // Flags override config options field by field
        let options = config
            .options
            .clone()
            .unwrap_or_default()
            .merge(qr.to_options());
        let quirks = if qr.legacy_quirks {
            Quirks::legacy()
        } else {
            config.quirks()
        };

        Self {
            config,
            options: (!options.is_empty()).then_some(options),
            quirks,
        }
    }

    fn builder(&self) -> Result<RequestUrlBuilder> {
        Ok(RequestUrlBuilder::new()
            .with_base(self.config.resolved_api_url()?)
            .with_quirks(self.quirks))
    }

    fn generator(&self) -> Result<QrGenerator> {
        Ok(QrGenerator::new(self.options.clone()).with_builder(self.builder()?))
    }
}

async fn run(cli: Cli, use_color: bool, output: &CliOutput) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Url { data, qr } => {
            let settings = Settings::new(config, &qr);
            let request = settings.builder()?.build(settings.options.as_ref(), &data);
            println!("{}", request.url);
        }
        Commands::Generate {
            data,
            qr,
            output_dir,
            show,
            no_download,
            json,
            pretty,
        } => {
            let settings = Settings::new(config, &qr);
            let prompter = InteractivePrompter::new();

            let data = match data {
                Some(data) => data,
                None => prompter.prompt_data()?,
            };
            let code = settings.generator()?.generate(&data)?;

            let show = show || settings.config.show_inline.unwrap_or(false);
            let dest_dir = if no_download {
                None
            } else {
                Some(output_dir.unwrap_or_else(|| settings.config.output_dir()))
            };

            let saved_to = fetch_and_store(&code, dest_dir, show, &prompter, output).await?;

            if json {
                let report = GenerateReport::new(&code, saved_to.as_deref());
                println!("{}", JsonFormatter::new(pretty).format_generated(&report)?);
            } else if let Some(path) = &saved_to {
                output.saved(path);
            } else {
                println!("{}", code.src);
            }
        }
        Commands::Inspect { qr, json, pretty } => {
            let settings = Settings::new(config, &qr);
            let options = settings.options.unwrap_or_default();
            let rows = option_report(&options, settings.quirks);

            let formatted = if json {
                JsonFormatter::new(pretty).format_options(&rows)?
            } else {
                TableFormatter::new(use_color).format_options(&rows)?
            };
            println!("{}", formatted);
        }
        Commands::Html {
            container,
            data,
            qr,
        } => {
            let settings = Settings::new(config, &qr);
            let code = match &data {
                Some(data) => Some(settings.generator()?.generate(data)?),
                None => None,
            };

            print!("{}", render_widget(&container, data.as_deref(), code.as_ref()));
        }
        Commands::Completions { shell } => {
            write_completions(shell, &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Download the image when it is saved or shown; returns where it was saved
async fn fetch_and_store(
    code: &GeneratedCode,
    dest_dir: Option<PathBuf>,
    show: bool,
    prompter: &InteractivePrompter,
    output: &CliOutput,
) -> Result<Option<PathBuf>> {
    if dest_dir.is_none() && !show {
        return Ok(None);
    }

    let downloader = ImageDownloader::new()?;
    let bytes = downloader.fetch(code).await?;

    if show {
        let capabilities = TerminalCapabilities::detect();
        match render_inline(&capabilities, &bytes, code.format, &code.download_filename())? {
            Some(sequence) => print!("{}", sequence),
            None => output.warning(&format!(
                "Cannot display {} images inline in {}",
                code.format, capabilities.terminal_name
            )),
        }
    }

    let Some(dest_dir) = dest_dir else {
        return Ok(None);
    };

    let target = dest_dir.join(sanitize_filename(&code.download_filename()));
    if !prompter.confirm_overwrite(&target)? {
        output.info(&format!("Kept existing {}", target.display()));
        return Ok(None);
    }

    Ok(Some(downloader.save(code, &bytes, &dest_dir).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(qr: QrArgs) -> Settings {
        let config = Config {
            legacy_quirks: Some(false),
            options: Some(QrOptions {
                size: Some(200),
                color: Some("000".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        Settings::new(config, &qr)
    }

    #[test]
    fn test_flags_override_config_options() {
        let settings = args(QrArgs {
            size: Some(300),
            ..Default::default()
        });

        let options = settings.options.unwrap();
        assert_eq!(options.size, Some(300));
        assert_eq!(options.color, Some("000".to_string()));
        assert_eq!(settings.quirks, Quirks::default());
    }

    #[test]
    fn test_legacy_flag_enables_quirks() {
        let settings = args(QrArgs {
            legacy_quirks: true,
            ..Default::default()
        });
        assert_eq!(settings.quirks, Quirks::legacy());
    }

    #[test]
    fn test_config_enables_quirks_without_flag() {
        let config = Config {
            legacy_quirks: Some(true),
            ..Default::default()
        };
        let settings = Settings::new(config, &QrArgs::default());
        assert_eq!(settings.quirks, Quirks::legacy());
    }

    #[test]
    fn test_no_options_at_all() {
        let settings = Settings::new(Config::default(), &QrArgs::default());
        assert!(settings.options.is_none());
    }

    #[test]
    fn test_color_flags() {
        let cli = Cli::try_parse_from(["qrgen", "inspect", "--no-color"]).unwrap();
        assert!(!should_use_color(&cli));

        let cli = Cli::try_parse_from(["qrgen", "inspect", "--force-color"]).unwrap();
        assert!(should_use_color(&cli));
    }
}
