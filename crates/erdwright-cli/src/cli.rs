//! Command-line interface for the erdwright utility
//!
//! Converts ER diagram notation to schema model JSON, canonical notation,
//! boxed summaries and SQL DDL.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::colorizer::colorize_summary;
use erdwright::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use erdwright::core::Detector;
use erdwright::plugins::er::{
    ErDetector, ErParser, NotationRenderer, SchemaModel, TableRenderer, COMMON_DATA_TYPES,
    SAMPLE_DIAGRAM,
};
use erdwright::sql::{generate_script, Dialect, SCRIPT_MIME_TYPE};

/// Erdwright - ER diagram notation and SQL schema scripts
#[derive(Parser)]
#[command(name = "erdwright")]
#[command(about = "Parse ER diagram notation and generate SQL schema scripts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse notation and print it back in canonical form
    Format {
        /// Input file containing ER notation (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse notation and print the schema model as JSON
    Parse {
        /// Input file containing ER notation (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Read a schema model as JSON and print notation
    Notation {
        /// Input file containing schema model JSON (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a SQL DDL script
    Ddl {
        /// Input file containing ER notation (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target dialect (mysql|postgresql|sqlite|sqlserver|oracle)
        #[arg(short, long, value_parser = parse_dialect)]
        dialect: Dialect,

        /// Treat the input as schema model JSON instead of notation
        #[arg(long)]
        from_json: bool,

        /// Write schema_<dialect>.sql into this directory instead of the output
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },

    /// Show tables and relationships as boxed text
    Inspect {
        /// Input file containing ER notation (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Validate ER notation and report diagnostics
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Fail on any line the parser would skip
        #[arg(long)]
        strict: bool,
    },

    /// Detect diagram type in input
    Detect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show supported SQL dialects and column types
    Types {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in sample diagram
    Sample {
        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// `types --json` payload
#[derive(Serialize)]
struct TypeCatalog {
    dialects: Vec<DialectInfo>,
    data_types: &'static [&'static str],
    mime_type: &'static str,
}

#[derive(Serialize)]
struct DialectInfo {
    name: &'static str,
    label: &'static str,
    file_name: String,
}

fn parse_dialect(value: &str) -> Result<Dialect, String> {
    value.parse::<Dialect>().map_err(|e| e.to_string())
}

/// Headline of the validate report; only detected input is called valid
fn validation_headline(detected: bool, model: &SchemaModel) -> String {
    let counts = format!(
        "{} tables, {} relationships",
        model.tables.len(),
        model.relationships.len()
    );
    if detected {
        format!("✓ Valid ER diagram ({})", counts)
    } else {
        format!("~ Parsed leniently ({})", counts)
    }
}

/// Main CLI application
pub struct ErdwrightApp {
    parser: ErParser,
    detector: ErDetector,
}

impl ErdwrightApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self {
            parser: ErParser::new(),
            detector: ErDetector::new(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());
        let log_format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Erdwright v{}", env!("CARGO_PKG_VERSION"));
        }

        let verbose = cli.verbose;
        match cli.command {
            Commands::Format { input, output } => self.format_command(input, output, verbose),
            Commands::Parse {
                input,
                output,
                compact,
            } => self.parse_command(input, output, compact, verbose),
            Commands::Notation { input, output } => self.notation_command(input, output, verbose),
            Commands::Ddl {
                input,
                output,
                dialect,
                from_json,
                export_dir,
            } => self.ddl_command(input, output, dialect, from_json, export_dir, verbose),
            Commands::Inspect {
                input,
                output,
                color,
            } => self.inspect_command(input, output, color, verbose),
            Commands::Validate { input, strict } => self.validate_command(input, strict, verbose),
            Commands::Detect { input } => self.detect_command(input, verbose),
            Commands::Types { json } => self.types_command(json, verbose),
            Commands::Sample { output } => self.write_output(output, SAMPLE_DIAGRAM),
        }
    }

    /// Read notation and parse it, logging skipped lines
    fn read_model(&self, input: Option<PathBuf>, verbose: bool) -> Result<SchemaModel> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let (model, skipped) = self.parser.parse_with_report(&content);
        for line in &skipped {
            warn!(line = line.line, reason = %line.reason, text = %line.text, "Skipped line");
        }
        info!(
            tables = model.tables.len(),
            relationships = model.relationships.len(),
            "Parsed input"
        );
        Ok(model)
    }

    /// Read schema model JSON
    fn read_model_json(&self, input: Option<PathBuf>) -> Result<SchemaModel> {
        let content = self.read_input(input)?;
        serde_json::from_str(&content).context("Failed to read schema model JSON")
    }

    /// Handle the format command
    fn format_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let model = self.read_model(input, verbose)?;
        let notation = NotationRenderer::new().render_model(&model);
        self.write_output(output, &notation)
    }

    /// Handle the parse command
    fn parse_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        compact: bool,
        verbose: bool,
    ) -> Result<()> {
        let model = self.read_model(input, verbose)?;
        let json = if compact {
            serde_json::to_string(&model)?
        } else {
            serde_json::to_string_pretty(&model)?
        };
        self.write_output(output, &json)
    }

    /// Handle the notation command
    fn notation_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let model = self.read_model_json(input)?;
        if verbose {
            eprintln!(
                "Loaded {} tables and {} relationships",
                model.tables.len(),
                model.relationships.len()
            );
        }
        let notation = NotationRenderer::new().render_model(&model);
        self.write_output(output, &notation)
    }

    /// Handle the ddl command
    fn ddl_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        dialect: Dialect,
        from_json: bool,
        export_dir: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let model = if from_json {
            self.read_model_json(input)?
        } else {
            self.read_model(input, verbose)?
        };

        let script = generate_script(&model, dialect);

        match export_dir {
            Some(dir) => {
                let path = self.export_script(&dir, dialect, &script)?;
                if verbose {
                    eprintln!("Wrote {} ({})", path.display(), SCRIPT_MIME_TYPE);
                }
                Ok(())
            }
            None => self.write_output(output, &script),
        }
    }

    /// Write a script as `schema_<dialect>.sql` inside `dir`
    pub fn export_script(&self, dir: &Path, dialect: Dialect, script: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory '{}'", dir.display()))?;
        let path = dir.join(dialect.script_file_name());
        fs::write(&path, script)
            .with_context(|| format!("Failed to write script '{}'", path.display()))?;
        debug!(path = %path.display(), "Exported script");
        Ok(path)
    }

    /// Handle the inspect command
    fn inspect_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        color: ColorChoice,
        verbose: bool,
    ) -> Result<()> {
        let model = self.read_model(input, verbose)?;
        let summary = TableRenderer::new().render_model(&model);
        let summary = if self.should_colorize(&output, color) {
            colorize_summary(&summary)
        } else {
            summary
        };
        self.write_output(output, &summary)
    }

    /// Determine if we should colorize the output based on color choice and output destination
    fn should_colorize(&self, output: &Option<PathBuf>, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                match output {
                    None => crossterm::tty::IsTty::is_tty(&std::io::stdout()),
                    Some(ref p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&std::io::stdout())
                    }
                    Some(_) => false,
                }
            }
        }
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, strict: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let detected = self.detector.detect(&content);
        if !detected {
            if strict {
                println!("✗ Could not detect an ER diagram");
                return Err(anyhow!("Unknown diagram type"));
            }
            println!("! Input does not look like an ER diagram");
        }

        let (model, skipped) = if strict {
            match self.parser.parse_strict(&content) {
                Ok(model) => (model, Vec::new()),
                Err(e) => {
                    println!("✗ Invalid ER diagram: {}", e);
                    return Err(e.into());
                }
            }
        } else {
            self.parser.parse_with_report(&content)
        };

        println!("{}", validation_headline(detected, &model));
        for line in &skipped {
            println!("  ~ line {}: {}: {}", line.line, line.reason, line.text);
        }
        for diagnostic in model.diagnostics() {
            println!("  ! {}", diagnostic);
        }
        Ok(())
    }

    /// Handle the detect command
    fn detect_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        if self.detector.detect(&content) {
            println!("{}", self.detector.diagram_type());
            Ok(())
        } else {
            eprintln!("Could not detect diagram type");
            Err(anyhow!("No ER diagram syntax found"))
        }
    }

    /// Handle the types command
    fn types_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported dialects and column types");
        }

        if json {
            let types = TypeCatalog {
                dialects: Dialect::ALL
                    .iter()
                    .map(|d| DialectInfo {
                        name: d.name(),
                        label: d.label(),
                        file_name: d.script_file_name(),
                    })
                    .collect(),
                data_types: COMMON_DATA_TYPES,
                mime_type: SCRIPT_MIME_TYPE,
            };
            println!("{}", serde_json::to_string_pretty(&types)?);
        } else {
            println!("Supported SQL dialects:");
            for dialect in Dialect::ALL {
                println!("  {:<11}- {}", dialect.name(), dialect.label());
            }
            println!();
            println!("Column types:");
            println!("  {}", COMMON_DATA_TYPES.join(", "));
        }

        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let stdout_content = if content.is_empty() || content.ends_with('\n') {
                    content.to_string()
                } else {
                    format!("{}\n", content)
                };
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for ErdwrightApp {
    fn default() -> Self {
        Self::new()
    }
}
