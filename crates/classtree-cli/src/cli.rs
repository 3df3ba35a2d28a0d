//! Command-line interface for the classtree utility
//!
//! Loads C++ sources, reports structural warnings, and prints the class
//! hierarchy as a console tree or exports it as a graph.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::colorizer::{colorize_heading, colorize_success, colorize_tree, colorize_warning};
use classtree::core::logging::init_logging;
use classtree::inheritance::{GraphExporter, StructuralWarning, TreeRenderer};
use classtree::sources::{find_source_files, load_sources};
use classtree::{analyze, Analysis, CharacterSet, GraphFormat, RenderConfig, Renderer};

/// Folder scanned when neither `--input` nor `--dir` is given
pub const DEFAULT_SOURCE_DIR: &str = "test/samples";

/// Comment written at the top of DOT exports
const GRAPH_TITLE: &str = "C++ Inheritance Tree";

const DUPLICATES_HEADING: &str = "⚠ Duplicate Class Definitions:";
const WARNINGS_HEADING: &str = "⚠ Validation Warnings:";
const NO_ISSUES: &str = "✅ No structural issues found.";

/// Classtree - Print C++ class hierarchies
#[derive(Parser)]
#[command(name = "classtree")]
#[command(about = "A Rust utility to print C++ class inheritance trees")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
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
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
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

/// Where the source text comes from
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Source file to analyze, repeatable (use - for stdin)
    #[arg(short, long, conflicts_with = "dir")]
    pub input: Vec<PathBuf>,

    /// Folder whose .cpp and .h files are analyzed
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report warnings and print the inheritance tree or graph
    Analyze {
        #[command(flatten)]
        sources: SourceArgs,

        /// What to produce after the warning report
        #[arg(long, value_enum, default_value_t = ModeChoice::Tree)]
        mode: ModeChoice,

        /// Leave out "(inherits from: ...)" notes on multi-parent classes
        #[arg(long)]
        no_notes: bool,

        /// Character set for tree connectors
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,

        /// Serialization of the graph in graph mode
        #[arg(long, value_enum, default_value_t = GraphFormatChoice::Dot)]
        graph_format: GraphFormatChoice,

        /// Output file for the graph (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report structural warnings only, failing when there are any
    Validate {
        #[command(flatten)]
        sources: SourceArgs,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List the source files a folder would contribute
    Files {
        /// Folder to scan
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Output produced after the warning report
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ModeChoice {
    /// Console tree
    #[default]
    Tree,
    /// Graph export
    Graph,
}

/// Supported tree character sets
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for CharacterSet {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => CharacterSet::Ascii,
            StyleChoice::Unicode => CharacterSet::Unicode,
        }
    }
}

/// Supported graph serializations
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum GraphFormatChoice {
    Dot,
    Json,
}

impl From<GraphFormatChoice> for GraphFormat {
    fn from(value: GraphFormatChoice) -> Self {
        match value {
            GraphFormatChoice::Dot => GraphFormat::Dot,
            GraphFormatChoice::Json => GraphFormat::Json,
        }
    }
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

/// One entry of `files --json`
#[derive(Debug, Serialize)]
struct FileEntry {
    path: String,
    bytes: u64,
}

/// What `analyze` prints, split by stream
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AnalyzeOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Main CLI application
pub struct ClassTreeApp {
    default_dir: PathBuf,
}

impl ClassTreeApp {
    /// Create a new application scanning [`DEFAULT_SOURCE_DIR`] by default
    pub fn new() -> Self {
        Self::with_default_dir(DEFAULT_SOURCE_DIR)
    }

    pub fn with_default_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            default_dir: dir.into(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("CLASSTREE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| {
                let level = if cli.verbose && cli.log_level == LogLevel::Warn {
                    LogLevel::Info
                } else {
                    cli.log_level
                };
                Some(level.as_str().to_string())
            });

        let log_format_str = std::env::var("CLASSTREE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Classtree v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Analyze {
                sources,
                mode,
                no_notes,
                style,
                color,
                graph_format,
                output,
            } => {
                let analysis = self.load_analysis(&sources, cli.verbose)?;
                let colored = Self::should_colorize(&output, mode, color);
                let config = RenderConfig::new(!no_notes, style.into());
                let streams = self.analyze_output(
                    &analysis,
                    mode,
                    config,
                    graph_format.into(),
                    output,
                    colored,
                )?;
                io::stderr().write_all(streams.stderr.as_bytes())?;
                let mut stdout = io::stdout().lock();
                stdout.write_all(streams.stdout.as_bytes())?;
                stdout.flush()?;
                Ok(())
            }
            Commands::Validate { sources, json } => {
                let analysis = self.load_analysis(&sources, cli.verbose)?;
                self.validate_command(&analysis, json)
            }
            Commands::Files { dir, json } => self.files_command(dir, json),
        }
    }

    /// Resolve the source arguments and run the analysis
    pub fn load_analysis(&self, sources: &SourceArgs, verbose: bool) -> Result<Analysis> {
        let content = self.read_sources(sources)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }
        Ok(analyze(&content))
    }

    /// Read and join the sources named by `--input`, or the files in the folder
    pub fn read_sources(&self, sources: &SourceArgs) -> Result<String> {
        if !sources.input.is_empty() {
            let mut contents = Vec::with_capacity(sources.input.len());
            for path in &sources.input {
                contents.push(self.read_input(path)?);
            }
            return Ok(contents.join("\n"));
        }

        let dir = sources.dir.as_deref().unwrap_or(&self.default_dir);
        let files = find_source_files(dir)?;
        info!(dir = %dir.display(), files = files.len(), "Loading sources");
        Ok(load_sources(&files)?)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, path: &Path) -> Result<String> {
        if path.to_string_lossy() == "-" {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(content)
        } else {
            fs::read_to_string(path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e))
        }
    }

    /// The duplicate and validation sections printed before any tree or graph
    pub fn warning_report(analysis: &Analysis, colored: bool) -> String {
        let heading = |s: &str| if colored { colorize_heading(s) } else { s.to_string() };
        let warning = |s: &str| if colored { colorize_warning(s) } else { s.to_string() };

        let mut report = String::new();
        if !analysis.duplicates().is_empty() {
            report.push('\n');
            report.push_str(&heading(DUPLICATES_HEADING));
            report.push('\n');
            for w in analysis
                .warnings
                .iter()
                .filter(|w| matches!(w, StructuralWarning::DuplicateClass(_)))
            {
                report.push_str(&warning(&format!("  {}", w)));
                report.push('\n');
            }
            report.push_str("\n\n");
        }

        let validation: Vec<_> = analysis.validation_warnings().collect();
        if validation.is_empty() {
            report.push('\n');
            report.push_str(&if colored {
                colorize_success(NO_ISSUES)
            } else {
                NO_ISSUES.to_string()
            });
            report.push('\n');
        } else {
            report.push('\n');
            report.push_str(&heading(WARNINGS_HEADING));
            report.push('\n');
            for w in validation {
                report.push_str(&warning(&format!("  {}", w)));
                report.push('\n');
            }
        }
        report.push_str("\n\n");
        report
    }

    /// Render the console tree, newline-terminated unless empty
    pub fn render_tree(
        &self,
        analysis: &Analysis,
        config: RenderConfig,
        colored: bool,
    ) -> Result<String> {
        let tree = TreeRenderer::with_config(config).render(&analysis.forest)?;
        let tree = if colored { colorize_tree(&tree) } else { tree };
        Ok(if tree.is_empty() { tree } else { format!("{}\n", tree) })
    }

    /// Build what `analyze` prints; a graph bound for a file is written here
    ///
    /// The warning report shares stdout with the tree. When the graph itself
    /// goes to stdout the report moves to stderr so the export stays parseable.
    pub fn analyze_output(
        &self,
        analysis: &Analysis,
        mode: ModeChoice,
        config: RenderConfig,
        format: GraphFormat,
        output: Option<PathBuf>,
        colored: bool,
    ) -> Result<AnalyzeOutput> {
        let report = Self::warning_report(analysis, colored);
        match mode {
            ModeChoice::Tree => Ok(AnalyzeOutput {
                stdout: report + &self.render_tree(analysis, config, colored)?,
                stderr: String::new(),
            }),
            ModeChoice::Graph => {
                let content = self.export_graph(analysis, format)?;
                match output.filter(|p| p.to_string_lossy() != "-") {
                    Some(path) => {
                        debug!(%format, destination = %path.display(), "Writing graph");
                        self.write_output(Some(path.clone()), &content)?;
                        Ok(AnalyzeOutput {
                            stdout: report,
                            stderr: format!("Graph saved to {}\n", path.display()),
                        })
                    }
                    None => {
                        debug!(%format, destination = "stdout", "Writing graph");
                        let stdout = if content.ends_with('\n') {
                            content
                        } else {
                            format!("{}\n", content)
                        };
                        Ok(AnalyzeOutput {
                            stdout,
                            stderr: report,
                        })
                    }
                }
            }
        }
    }

    /// Export the graph in `format`
    pub fn export_graph(&self, analysis: &Analysis, format: GraphFormat) -> Result<String> {
        let export = GraphExporter::new().render(&analysis.forest)?;
        Ok(export.to_format(format, GRAPH_TITLE)?)
    }

    /// Print the merged warnings, failing when there are any
    fn validate_command(&self, analysis: &Analysis, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&analysis.report())?);
        } else if analysis.has_warnings() {
            for warning in &analysis.warnings {
                println!("{}", warning);
            }
        } else {
            println!("{}", NO_ISSUES);
        }

        if analysis.has_warnings() {
            Err(anyhow!(
                "{} structural warning(s) found",
                analysis.warnings.len()
            ))
        } else {
            Ok(())
        }
    }

    /// List the files a folder would contribute
    fn files_command(&self, dir: Option<PathBuf>, json: bool) -> Result<()> {
        let dir = dir.unwrap_or_else(|| self.default_dir.clone());
        let files = find_source_files(&dir)?;

        if json {
            let entries = files
                .iter()
                .map(|path| -> Result<FileEntry> {
                    Ok(FileEntry {
                        path: path.display().to_string(),
                        bytes: fs::metadata(path)?.len(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else {
            for path in &files {
                println!("{}", path.display());
            }
        }
        Ok(())
    }

    /// Determine if we should colorize based on color choice and destination
    fn should_colorize(output: &Option<PathBuf>, mode: ModeChoice, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                // graph files and piped output stay plain
                let to_stdout = mode == ModeChoice::Tree
                    || output.as_ref().map_or(true, |p| p.to_str() == Some("-"));
                to_stdout && crossterm::tty::IsTty::is_tty(&io::stdout())
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for ClassTreeApp {
    fn default() -> Self {
        Self::new()
    }
}
