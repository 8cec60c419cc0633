//! Command-line interface definitions.
//!
//! Every option can be given as a flag; the feed key can also come from the
//! environment.

use clap::{Parser, ValueEnum};

/// How the rendered cards are printed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per card
    #[default]
    Text,
    /// Markdown cards with image links
    Markdown,
    /// The deduplicated records as a JSON array
    Json,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Key from the environment, plain-text cards
/// SHELTER_FEED_KEY=... shelter_photos
///
/// # Markdown cards, plus a JSON snapshot on disk
/// shelter_photos --feed-key KEY --format markdown --json-output-dir ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Open-data API key selecting the feed
    #[arg(short = 'k', long, env = "SHELTER_FEED_KEY", hide_env_values = true)]
    pub feed_key: Option<String>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the open-data gateway host (host[:port])
    #[arg(long)]
    pub host: Option<String>,

    /// Override the dataset service name
    #[arg(long)]
    pub service: Option<String>,

    /// Output format for the cards
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Directory for the JSON snapshot; skipped when not given
    #[arg(short, long)]
    pub json_output_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "shelter_photos",
            "--feed-key",
            "abc",
            "--format",
            "markdown",
            "--json-output-dir",
            "./json",
        ]);

        assert_eq!(cli.feed_key.as_deref(), Some("abc"));
        assert_eq!(cli.format, OutputFormat::Markdown);
        assert_eq!(cli.json_output_dir.as_deref(), Some("./json"));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "shelter_photos",
            "-k",
            "abc",
            "-c",
            "/etc/shelter.yaml",
            "-f",
            "json",
            "-j",
            "/tmp/json",
        ]);

        assert_eq!(cli.config.as_deref(), Some("/etc/shelter.yaml"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["shelter_photos", "--host", "localhost:8088"]);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.host.as_deref(), Some("localhost:8088"));
        assert!(cli.service.is_none());
        assert!(cli.json_output_dir.is_none());
    }
}
