use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "esx-photos")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract access point pictures from Ekahau .esx projects")]
#[command(
    long_about = "esx-photos unpacks an Ekahau site survey project (.esx) and copies every \
                  picture attached to a note into an AP-Images directory, renamed after the \
                  access point (or note) it belongs to and grouped by floor plan when the \
                  project has floor plans."
)]
#[command(after_help = "EXAMPLES:\n  \
    esx-photos survey.esx\n  \
    esx-photos survey.esx --output site-photos --verbose\n  \
    esx-photos survey.esx --dry-run --output-format json\n  \
    esx-photos survey.esx --config my-config.toml --report")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Ekahau project file (.esx)
    #[arg(required_unless_present = "generate_config")]
    pub file: Option<PathBuf>,

    /// Output directory (defaults to ./AP-Images)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Keep unicode characters in generated file names
    #[arg(long)]
    pub allow_unicode: bool,

    /// Extension given to every copied picture
    #[arg(long, value_name = "EXT", help = "Image file extension (default: png)")]
    pub extension: Option<String>,

    /// Directory the project is expanded into while it is processed
    #[arg(long, value_name = "DIR", help = "Where to expand the project (default: system temp dir)")]
    pub work_dir: Option<PathBuf>,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show where pictures would go without copying them)
    #[arg(long, help = "Show what would be copied without actually doing it")]
    pub dry_run: bool,

    /// Write extraction_report.json into the output directory
    #[arg(long)]
    pub report: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let output_dir = self.output.as_ref().map(|o| {
            if o.is_absolute() {
                o.clone()
            } else {
                std::env::current_dir().unwrap_or_default().join(o)
            }
        });

        // Flags only ever switch these on; absence leaves the config file in charge.
        CliOverrides::new()
            .with_output_dir(output_dir)
            .with_image_extension(self.extension.clone())
            .with_allow_unicode(self.allow_unicode.then_some(true))
            .with_write_report(self.report.then_some(true))
            .with_working_directory(self.work_dir.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("esx-photos").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_file() {
        let cli = parse(&["survey.esx"]);
        assert_eq!(cli.file, Some(PathBuf::from("survey.esx")));
        assert!(!cli.dry_run);
        assert!(!cli.report);
    }

    #[test]
    fn test_file_required_without_generate_config() {
        assert!(Cli::try_parse_from(["esx-photos", "--dry-run"]).is_err());

        let cli = parse(&["--generate-config"]);
        assert!(cli.generate_config);
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["esx-photos", "a.esx", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_overrides_from_flags() {
        let cli = parse(&[
            "survey.esx",
            "--output",
            "/tmp/photos",
            "--extension",
            "jpg",
            "--allow-unicode",
            "--report",
        ]);

        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.output_dir, Some(PathBuf::from("/tmp/photos")));
        assert_eq!(overrides.image_extension.as_deref(), Some("jpg"));
        assert_eq!(overrides.allow_unicode, Some(true));
        assert_eq!(overrides.write_report, Some(true));
        assert!(overrides.working_directory.is_none());
    }

    #[test]
    fn test_absent_flags_leave_config_alone() {
        let overrides = parse(&["survey.esx"]).create_cli_overrides();
        assert!(overrides.output_dir.is_none());
        assert!(overrides.allow_unicode.is_none());
        assert!(overrides.write_report.is_none());
    }

    #[test]
    fn test_relative_output_is_anchored_to_cwd() {
        let overrides = parse(&["survey.esx", "-o", "photos"]).create_cli_overrides();
        let output_dir = overrides.output_dir.unwrap();
        assert!(output_dir.is_absolute());
        assert!(output_dir.ends_with("photos"));
    }

    #[test]
    fn test_verbosity_level() {
        assert_eq!(parse(&["a.esx", "-vv"]).verbosity_level(), 2);
        assert_eq!(parse(&["a.esx", "-v"]).verbosity_level(), 1);
        assert_eq!(parse(&["a.esx", "-q"]).verbosity_level(), 0);
    }
}
