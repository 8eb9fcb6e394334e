use crate::domain::model::CapitalBand;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "vsl-funnel")]
#[command(about = "Video sales letter funnel: lead capture, submission and page export")]
pub struct CliConfig {
    #[arg(long, default_value = "funnel.toml", help = "Funnel TOML configuration")]
    pub config: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate the configuration file
    Check,

    /// Submit one lead through the capture form
    Submit {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        #[arg(long, help = "up_to_50k | 50k_to_200k | 200k_to_1m | over_1m")]
        capital: Option<CapitalBand>,
    },

    /// Write static HTML previews of each page state (no script, not a live page)
    Render {
        #[arg(long, default_value = "landing-page")]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit_command() {
        let cli = CliConfig::parse_from([
            "vsl-funnel",
            "--config",
            "site.toml",
            "submit",
            "--name",
            "Ana",
            "--email",
            "ana@example.com",
            "--phone",
            "11999990000",
            "--capital",
            "over_1m",
        ]);

        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert_eq!(cli.log_format, LogFormat::Compact);
        match cli.command {
            Command::Submit { name, capital, .. } => {
                assert_eq!(name, "Ana");
                assert_eq!(capital, Some(CapitalBand::Over1m));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_capital_band_is_rejected() {
        let result = CliConfig::try_parse_from([
            "vsl-funnel",
            "submit",
            "--name",
            "Ana",
            "--email",
            "a@b.c",
            "--phone",
            "1",
            "--capital",
            "a-lot",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_defaults() {
        let cli = CliConfig::parse_from(["vsl-funnel", "--log-format", "json", "render"]);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.config, PathBuf::from("funnel.toml"));
        assert!(matches!(cli.command, Command::Render { .. }));
    }
}
