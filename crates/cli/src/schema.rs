//! The schema download command.

use crate::output::{render_outputs, SchemaFormat, SchemaOutput};
use crate::OutputOptions;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use geq_introspect::IntrospectionClient;
use std::path::PathBuf;

/// Arguments for downloading a schema.
#[derive(Debug, Default, Args)]
pub struct DownloadArgs {
    /// GraphQL endpoint URL to introspect
    #[arg(short, long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// HTTP header to include in the request
    /// Format: "Header-Name: Header-Value"
    #[arg(short = 'H', long, value_name = "HEADER")]
    pub header: Option<String>,

    /// Output file path (defaults to schema.graphql, or schema.json with --json)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the introspection JSON instead of SDL
    #[arg(short, long)]
    pub json: bool,

    /// Also write a minified schema (schema.min.graphql or schema.min.json)
    #[arg(short, long)]
    pub minify: bool,
}

impl DownloadArgs {
    fn format(&self) -> SchemaFormat {
        if self.json {
            SchemaFormat::Json
        } else {
            SchemaFormat::Sdl
        }
    }
}

/// Fetches the schema and writes every requested output.
///
/// Configuration problems are reported before any request is sent.
#[tracing::instrument(skip(args, output_opts), fields(endpoint = ?args.endpoint))]
pub async fn run(args: &DownloadArgs, output_opts: OutputOptions) -> Result<()> {
    let start_time = std::time::Instant::now();
    let format = args.format();

    let endpoint = args
        .endpoint
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .context("GraphQL endpoint URL is required\n\nUsage: geq --endpoint <URL> [OPTIONS]")?;

    let client = IntrospectionClient::new()
        .with_header_line(args.header.as_deref().unwrap_or_default())
        .context("Failed to parse --header")?;

    let spinner = crate::progress::spinner(
        &format!("Fetching schema from {endpoint}..."),
        output_opts.show_progress,
    );
    let fetched = client.execute_raw(endpoint).await;
    spinner.finish_and_clear();
    let raw = fetched.with_context(|| format!("Failed to fetch schema from {endpoint}"))?;

    let outputs = render_outputs(&raw, format, args.output.as_deref(), args.minify)
        .context("Failed to process introspection response")?;

    for output in &outputs {
        write_output(output, format, output_opts)?;
    }

    if output_opts.show_info {
        let duration = start_time.elapsed();
        println!("  {} {:.2}s", "⏱".dimmed(), duration.as_secs_f64());
    }

    Ok(())
}

fn write_output(output: &SchemaOutput, format: SchemaFormat, output_opts: OutputOptions) -> Result<()> {
    std::fs::write(&output.path, &output.contents).with_context(|| {
        format!(
            "Failed to write schema to file '{}'",
            output.path.display()
        )
    })?;
    tracing::info!(path = %output.path.display(), bytes = output.contents.len(), "Wrote schema");

    if output_opts.show_info {
        let kind = if output.minified { "minified " } else { "" };
        println!(
            "{} Schema saved to {} ({kind}{} format)",
            "✓".green(),
            output.path.display().to_string().cyan(),
            format.label()
        );
    }
    Ok(())
}
