// src/main.rs

use clap::Parser;

mod core;
mod logging;
mod ui;

use crate::core::engine;
use crate::core::models::AnalysisError;

#[derive(Debug, Parser)]
#[command(
    name = "sitetrust",
    version,
    about = "Scores how trustworthy a website looks before you visit it"
)]
struct Cli {
    /// Website address to analyze. A bare domain is assumed to be https.
    url: String,

    /// Emit the report as pretty-printed JSON instead of styled text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    color_eyre::install()?;
    logging::initialize_logging()?;

    let target = normalize_scheme(&cli.url);
    match engine::analyze_url(&target).await {
        Ok(report) => {
            if cli.json {
                ui::render_json(&report)?;
            } else {
                ui::render_text(&report);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(exit_code(&err));
        }
    }
}

/// Prepends `https://` when the input carries no scheme, mirroring what a
/// browser address bar does. Explicit `http://` is kept as-is so the
/// plaintext finding can fire.
fn normalize_scheme(raw: &str) -> String {
    if !raw.starts_with("http://") && !raw.starts_with("https://") {
        format!("https://{raw}")
    } else {
        raw.to_string()
    }
}

/// Rejected input is a usage error (2, same class as a clap parse
/// failure); anything later is an analysis failure (1).
fn exit_code(err: &AnalysisError) -> i32 {
    match err {
        AnalysisError::InvalidUrl { .. } => 2,
        AnalysisError::HostExtraction { .. } => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domains_are_assumed_https() {
        assert_eq!(normalize_scheme("example.com"), "https://example.com");
        assert_eq!(
            normalize_scheme("sub.example.com/path"),
            "https://sub.example.com/path"
        );
    }

    #[test]
    fn explicit_schemes_are_left_alone() {
        assert_eq!(normalize_scheme("http://example.com"), "http://example.com");
        assert_eq!(
            normalize_scheme("https://example.com"),
            "https://example.com"
        );
    }

    #[test]
    fn invalid_input_maps_to_the_usage_exit_code() {
        let invalid = AnalysisError::InvalidUrl {
            input: "http://[half-open".into(),
        };
        assert_eq!(exit_code(&invalid), 2);

        let hostless = AnalysisError::HostExtraction {
            input: "data:text/plain,hello".into(),
        };
        assert_eq!(exit_code(&hostless), 1);
    }
}
