//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Fetch, normalize and synthesize playing-card SVG decks
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Root directory for deck output (overrides [output] root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: cardforge.toml)
    #[arg(short = 'C', long, global = true, default_value = "cardforge.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(long)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Download the Atlas deck from Wikimedia Commons into atlasnye/
    Atlasnye {
        #[command(flatten)]
        args: DownloadArgs,
    },

    /// Download the Brescia deck from Wikimedia Commons into brescia/
    Brescia {
        #[command(flatten)]
        args: DownloadArgs,
    },

    /// Generate Brescia backs (1B, 2B) and jokers (1J, 2J)
    BresciaExtras,

    /// Split the htdebeer sprite sheet into htdebeer/
    Htdebeer {
        /// Sprite sheet to read; downloaded here when missing
        /// (default: <output root>/svg-cards.svg)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// Download DigitalDesignLabs cards, split by size class
    Ddl {
        #[command(flatten)]
        args: DownloadArgs,
    },

    /// Fit Wikimedia backs/jokers into the DigitalDesignLabs template
    DdlExtras,

    /// Validate SVG files recursively
    #[command(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        args: ValidateArgs,
    },
}

/// Shared arguments of the download commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DownloadArgs {
    /// Download again even when the output file exists
    #[arg(short, long)]
    pub force: bool,
}

/// Validate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Directory to search for SVGs
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub directory: PathBuf,

    /// Print validator output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable svgcheck validation (disabled by default)
    #[arg(long)]
    pub svgcheck: bool,

    /// Also check that every file renders (usvg)
    #[arg(long)]
    pub render: bool,

    /// Well-formedness checker
    #[arg(long, value_enum, default_value_t = XmlChecker::Auto)]
    pub xml_checker: XmlChecker,
}

/// Which well-formedness checker to run.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XmlChecker {
    /// `xmllint` when on PATH, otherwise builtin
    #[default]
    Auto,
    /// Always `xmllint --noout`
    Xmllint,
    /// Built-in quick-xml parse
    Builtin,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_validate_args() {
        let cli = Cli::parse_from(["cardforge", "validate", "out", "-v", "--svgcheck"]);
        let Commands::Validate { args } = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.directory, PathBuf::from("out"));
        assert!(args.verbose && args.svgcheck && !args.render);
        assert_eq!(args.xml_checker, XmlChecker::Auto);
    }

    #[test]
    fn test_xml_checker_value() {
        let cli = Cli::parse_from(["cardforge", "validate", ".", "--xml-checker", "builtin"]);
        let Commands::Validate { args } = cli.command else {
            unreachable!()
        };
        assert_eq!(args.xml_checker, XmlChecker::Builtin);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cardforge", "atlasnye", "--force", "-o", "/tmp/decks"]);
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/decks")));
        assert!(matches!(
            cli.command,
            Commands::Atlasnye {
                args: DownloadArgs { force: true }
            }
        ));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        assert!(Cli::try_parse_from(["cardforge", "validate"]).is_err());
    }
}
