//! Command-line interface for tagsense
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and command-line overrides
//! - Reading the document and locating the cursor
//! - Rendering candidates as plain text or JSON

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use crate::completion::CandidateList;
use crate::config::{Config, LogLevel};
use crate::error::{ConfigError, Result, TagsenseError};
use crate::parser::CursorContext;

/// Markup completion at a cursor position
#[derive(Parser, Debug)]
#[command(
    name = "tagsense",
    version,
    about = "Schema-driven markup completion",
    long_about = "Parses a markup document up to a cursor offset and prints the element,
attribute or value completions valid at that position."
)]
pub struct CliArgs {
    /// Document to complete in; `-` reads standard input
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Cursor position as a byte offset (defaults to the end of the document)
    #[arg(short = 'o', long, value_name = "BYTES")]
    pub offset: Option<usize>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Directory of TOML schema files
    #[arg(long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// List the doctype declarations of every registered schema
    #[arg(long)]
    pub doctypes: bool,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for tagsense
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// How candidates are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One candidate per line: text, category and description separated by tabs
    Plain,
    /// A JSON object with the cursor context and the candidate array
    Json,
}

/// JSON shape of a completion answer
#[derive(Serialize)]
struct CompletionReport<'a> {
    context: &'static str,
    prefix: &'a str,
    candidates: &'a CandidateList,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Parse the process arguments and load configuration
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Build an interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and apply argument overrides
    ///
    /// An explicit `--config` file must exist and be valid. The default file
    /// is optional; if it is invalid a warning is printed and defaults are used.
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = match &args.config_file {
            Some(path) => Config::from_file(path)?,
            None => Config::load().unwrap_or_else(|e| {
                eprintln!("Warning: {}", e);
                eprintln!("Using default configuration instead.");
                Config::default()
            }),
        };

        Self::apply_args_to_config(&mut config, args);
        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if let Some(dir) = &args.schema_dir {
            config.schemas.directory = Some(dir.clone());
        }

        config.logging.level = match args.verbose {
            0 if args.quiet => LogLevel::Error,
            0 => config.logging.level,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if a subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Config { show, validate }) => {
                if *validate {
                    self.validate_config_file();
                }
                if *show {
                    self.show_config()?;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn validate_config_file(&self) {
        let path = self.config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist, defaults apply");
            return;
        }

        match Config::from_file(&path) {
            Ok(_) => println!("Configuration is valid"),
            Err(e) => println!("Configuration is invalid: {}", e),
        }
    }

    fn show_config(&self) -> Result<()> {
        let rendered = toml::to_string_pretty(&self.config)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        println!("# {}", self.config_path().display());
        println!("{}", rendered);
        Ok(())
    }

    /// Configuration file path (from args or default)
    fn config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Read the document named on the command line
    pub async fn read_document(&self) -> Result<String> {
        match self.args.file.as_deref() {
            Some(path) if path.as_os_str() == "-" => {
                use tokio::io::AsyncReadExt;
                let mut text = String::new();
                tokio::io::stdin().read_to_string(&mut text).await?;
                Ok(text)
            }
            Some(path) => Ok(tokio::fs::read_to_string(path).await?),
            None => Err(TagsenseError::Generic(
                "no input file given (use - for standard input)".to_string(),
            )),
        }
    }

    /// Cursor offset within `text`, clamped to its length
    pub fn cursor_offset(&self, text: &str) -> usize {
        self.args.offset.map_or(text.len(), |o| o.min(text.len()))
    }

    /// Render candidates in the selected output format
    pub fn render(&self, context: &CursorContext, candidates: &CandidateList) -> Result<String> {
        match self.args.format {
            OutputFormat::Plain => Ok(candidates
                .iter()
                .map(|c| format!("{}\t{}\t{}", c.display_text, c.category, c.description))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Json => {
                let report = CompletionReport {
                    context: context.kind(),
                    prefix: context.prefix(),
                    candidates,
                };
                serde_json::to_string_pretty(&report)
                    .map_err(|e| TagsenseError::Generic(format!("JSON encoding failed: {}", e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::Candidate;

    fn interface(argv: &[&str]) -> CliInterface {
        let args = CliArgs::try_parse_from(argv).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        CliInterface { args, config }
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(["tagsense", "page.html"]).unwrap();
        assert_eq!(args.file, Some(PathBuf::from("page.html")));
        assert_eq!(args.offset, None);
        assert_eq!(args.format, OutputFormat::Plain);
        assert_eq!(args.verbose, 0);
        assert!(!args.doctypes);
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = CliArgs::try_parse_from([
            "tagsense",
            "--offset",
            "12",
            "--format",
            "json",
            "--schema-dir",
            "schemas",
            "-vv",
            "-",
        ])
        .unwrap();
        assert_eq!(args.offset, Some(12));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.schema_dir, Some(PathBuf::from("schemas")));
        assert_eq!(args.verbose, 2);
        assert_eq!(args.file, Some(PathBuf::from("-")));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(CliArgs::try_parse_from(["tagsense", "--format", "xml", "a.html"]).is_err());
    }

    #[test]
    fn test_config_subcommand() {
        let args = CliArgs::try_parse_from(["tagsense", "config", "--show"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Config {
                show: true,
                validate: false
            })
        ));
    }

    #[test]
    fn test_args_override_config() {
        let cli = interface(&["tagsense", "--schema-dir", "/opt/schemas", "-v", "a.html"]);
        assert_eq!(
            cli.config().schemas.directory,
            Some(PathBuf::from("/opt/schemas"))
        );
        assert_eq!(cli.config().logging.level, LogLevel::Debug);

        let quiet = interface(&["tagsense", "-q", "a.html"]);
        assert_eq!(quiet.config().logging.level, LogLevel::Error);
    }

    #[test]
    fn test_cursor_offset_clamped() {
        let cli = interface(&["tagsense", "--offset", "100", "a.html"]);
        assert_eq!(cli.cursor_offset("<html>"), 6);
        let cli = interface(&["tagsense", "a.html"]);
        assert_eq!(cli.cursor_offset("<p>"), 3);
    }

    #[test]
    fn test_render_plain() {
        let cli = interface(&["tagsense", "a.html"]);
        let list = CandidateList::from(vec![
            Candidate::element("div", "Generic block container"),
            Candidate::literal("!--", "Comment"),
        ]);
        let out = cli
            .render(&CursorContext::TagOpen { name: "d".into() }, &list)
            .unwrap();
        assert_eq!(out, "div\telement\tGeneric block container\n!--\tliteral\tComment");
    }

    #[test]
    fn test_render_json() {
        let cli = interface(&["tagsense", "--format", "json", "a.html"]);
        let list = CandidateList::from(vec![Candidate::value("get", "")]);
        let context = CursorContext::AttributeValue {
            element: "form".into(),
            attribute: "method".into(),
            value: "g".into(),
        };
        let out = cli.render(&context, &list).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["context"], "attribute-value");
        assert_eq!(json["prefix"], "g");
        assert_eq!(json["candidates"][0]["display_text"], "get");
        assert_eq!(json["candidates"][0]["category"], "attribute-value");
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let cli = interface(&["tagsense", "--doctypes"]);
        assert!(cli.read_document().await.is_err());
    }
}
