//! TKG CLI - Team knowledge graph from an email report
//!
//! Usage:
//!   tkg [INPUT] [--output <path>] [--format svg|json] [--label-width <n>] [--title <text>]
//!
//! Reads the document, prints the extracted entries, and writes the rendered
//! graph. Environment variables (`TKG_*`, `LOG_LEVEL`, `LOG_FORMAT`) provide
//! defaults that flags override.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tkg_core::{AppConfig, LoggingConfig, OutputFormat, TkgError};
use tkg_extractor::EmailExtractor;
use tkg_graph::{write_output, JsonRenderer, KnowledgeGraph, LayoutEngine, Renderer, SvgRenderer};

#[derive(Parser, Debug)]
#[command(name = "tkg")]
#[command(about = "Build a team knowledge graph from an email report")]
#[command(version)]
struct Cli {
    /// Input document (PDF or plain text)
    input: Option<PathBuf>,

    /// Output file; defaults to team_knowledge_graph.<format>
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Column width for Person and Email labels
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    label_width: Option<u16>,

    /// Title drawn above the graph
    #[arg(long)]
    title: Option<String>,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: tkg_core::ConfigError| e.to_string())
}

impl Cli {
    /// Apply flags on top of the environment configuration
    fn merge_into(self, mut config: AppConfig) -> AppConfig {
        if let Some(input) = self.input {
            config.input.path = input;
        }
        if let Some(output) = self.output {
            config.output.path = Some(output);
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(width) = self.label_width {
            config.layout.label_width = usize::from(width);
        }
        if let Some(title) = self.title {
            config.output.title = title;
        }
        config
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Logs go to stderr so stdout carries only the extracted entries
    if logging.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let env_config = AppConfig::from_env().context("invalid environment configuration")?;
    let config = cli.merge_into(env_config);
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging);

    let input = &config.input.path;
    info!(path = %input.display(), "Reading document");
    let lines = tkg_parser::read_lines(input).map_err(TkgError::from)?;

    let (records, stats) = EmailExtractor::new().extract_with_stats(&lines);
    info!(
        lines = stats.lines_scanned,
        records = stats.records_emitted,
        duplicates = stats.duplicates_dropped,
        rejected = stats.candidates_rejected,
        yield_rate = stats.yield_rate(),
        "Extracted person records"
    );
    if records.is_empty() {
        warn!(path = %input.display(), "No person records found");
    }

    println!("Extracted entries:");
    for record in &records {
        println!("{record}");
    }

    let graph = KnowledgeGraph::from_records(&records);
    let layout = LayoutEngine::new()
        .with_label_width(config.layout.label_width)
        .compute(&graph);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        organizations = layout.blocks.len(),
        "Computed layout"
    );

    let renderer: Box<dyn Renderer> = match config.output.format {
        OutputFormat::Svg => Box::new(SvgRenderer::new().with_title(config.output.title.clone())),
        OutputFormat::Json => Box::new(JsonRenderer),
    };
    let output = config.output.resolved_path();
    write_output(renderer.as_ref(), &layout, &output)
        .with_context(|| format!("failed to render {}", output.display()))?;

    info!(path = %output.display(), format = renderer.extension(), "Wrote graph");
    Ok(())
}
