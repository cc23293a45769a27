//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, info};

use gongwen_ast::Renderer;
use gongwen_core::input::STDIN_MARKER;
use gongwen_core::{
    parse_markdown, read_source, Assembler, BodyInput, CoreError, FieldLayer, FlatRecord,
    InputFormat, Sources, TextList,
};
use gongwen_ooxml::DocxWriter;

use crate::config::Settings;
use crate::logging;

/// Output file used when `-o` is not given
pub const DEFAULT_OUTPUT: &str = "示例公文.docx";

#[derive(Parser, Debug)]
#[command(name = "gongwen")]
#[command(author, version, about = "生成符合公文格式的Word文档", long_about = None)]
pub struct Cli {
    /// Input JSON file, or '-' for stdin; .md/.markdown files are read as Markdown
    #[arg(long)]
    pub input: Option<String>,

    /// Controlled Markdown input file, or '-' for stdin
    #[arg(long)]
    pub md: Option<String>,

    /// Title
    #[arg(long)]
    pub title: Option<String>,

    /// Recipients, several joined with 、
    #[arg(long)]
    pub recipients: Option<String>,

    /// Body text, one paragraph per line
    #[arg(long)]
    pub body: Option<String>,

    /// Body text file, one paragraph per line
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Attachment name; repeat for several
    #[arg(long = "attachment")]
    pub attachments: Vec<String>,

    /// Output DOCX file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let output = generate_command(&cli)?;
    println!("已生成：{}", output.display());
    Ok(())
}

/// Generate the document described by `cli` and return its absolute path
pub fn generate_command(cli: &Cli) -> Result<PathBuf> {
    let settings = Settings::load(cli.config.as_deref())?;
    let sources = build_sources(cli)?;

    let record = sources.resolve();
    let segments = Assembler::new(&settings.typography).assemble(&record);
    info!(segments = segments.len(), title = %record.title, "document assembled");

    let bytes = DocxWriter::new(settings.page)
        .render(&record.title, &segments)
        .context("Failed to render DOCX")?;

    if let Some(parent) = cli.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&cli.output, bytes)
        .with_context(|| format!("Failed to write output file: {}", cli.output.display()))?;

    let output = fs::canonicalize(&cli.output)
        .with_context(|| format!("Failed to resolve output path: {}", cli.output.display()))?;
    debug!(path = %output.display(), "output written");
    Ok(output)
}

/// Collect every input the flags name
///
/// `--md` takes priority over `--input`. Overrides are only recorded for
/// non-empty flag values, and `--body-file` wins over `--body`.
pub fn build_sources(cli: &Cli) -> Result<Sources> {
    let mut sources = Sources {
        overrides: overrides(cli)?,
        ..Default::default()
    };

    let (path, format) = match (&cli.md, &cli.input) {
        (Some(md), _) => (md, InputFormat::Markdown),
        (None, Some(input)) => (input, InputFormat::detect(input)),
        (None, None) => return Ok(sources),
    };

    let text = read_input(path)?;
    match format {
        InputFormat::Markdown => {
            debug!(path = %path, "reading controlled markdown");
            sources.markdown = Some(parse_markdown(&text));
        }
        InputFormat::Json => {
            debug!(path = %path, "reading flat JSON record");
            let record = FlatRecord::from_json(&text)
                .with_context(|| format!("Failed to parse input file: {}", path))?;
            sources.flat = Some(record);
        }
    }
    Ok(sources)
}

fn overrides(cli: &Cli) -> Result<FieldLayer> {
    let mut layer = FieldLayer::new();

    if let Some(title) = non_empty(&cli.title) {
        layer = layer.with_title(title);
    }
    if let Some(recipients) = non_empty(&cli.recipients) {
        layer = layer.with_recipients(TextList::One(recipients.to_string()));
    }

    if let Some(path) = &cli.body_file {
        let text = read_input(&path.to_string_lossy())?;
        layer = layer.with_body(BodyInput::Text(text));
    } else if let Some(body) = non_empty(&cli.body) {
        layer = layer.with_body(BodyInput::Text(body.to_string()));
    }

    if !cli.attachments.is_empty() {
        layer = layer.with_attachments(TextList::Many(cli.attachments.clone()));
    }

    Ok(layer)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn read_input(path: &str) -> Result<String> {
    match read_source(path) {
        Ok(text) => Ok(text),
        Err(CoreError::MissingFile(missing)) => {
            anyhow::bail!("Input file not found: {}", missing.display())
        }
        Err(e) => {
            let source = if path == STDIN_MARKER {
                "standard input"
            } else {
                path
            };
            Err(e).with_context(|| format!("Failed to read {}", source))
        }
    }
}
