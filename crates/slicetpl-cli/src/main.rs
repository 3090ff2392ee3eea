//! `slicetpl` CLI — preview Jinja templates with Python-style slice syntax.
//!
//! ## Usage
//!
//! ```sh
//! # Render a template file against JSON data
//! slicetpl render -t greeting.j2 -d data.json
//!
//! # Template from stdin, YAML data, output to a file
//! echo 'Hello {{ name[1:-1] }}' | slicetpl render -d data.yaml -o out.txt
//!
//! # Show what the preprocessor does to a template
//! echo '{{ items[-2:] }}' | slicetpl preprocess --explain
//!
//! # Evaluate a single expression
//! slicetpl eval 'items[1:]' -d data.json
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use slicetpl_core::{parse_context, rewrites, DataFormat, RenderOptions, Renderer};
use std::io::{self, Read};
use std::path::Path;

#[derive(Parser)]
#[command(
    name = "slicetpl",
    version,
    about = "Preview Jinja templates with Python-style slice syntax"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Args)]
struct DataArgs {
    /// Data file (JSON or YAML)
    #[arg(short, long)]
    data: Option<String>,
    /// Data format; detected from the data file extension if omitted
    #[arg(long)]
    format: Option<DataFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template against a data file
    Render {
        /// Template file (reads from stdin if omitted)
        #[arg(short, long)]
        template: Option<String>,
        #[command(flatten)]
        data: DataArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Compile the template as-is, without rewriting bracket slices
        #[arg(long)]
        no_preprocess: bool,
        /// Fail on undefined variables
        #[arg(long)]
        strict: bool,
    },
    /// Print the template with bracket slices rewritten to filter calls
    Preprocess {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// List each rewrite instead of printing the rewritten template
        #[arg(long)]
        explain: bool,
    },
    /// Evaluate a single expression and print the result as JSON
    Eval {
        /// Expression, e.g. `name[1:-1]` or `items | slice(-2)`
        expr: String,
        #[command(flatten)]
        data: DataArgs,
        /// Fail on undefined variables
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            template,
            data,
            output,
            no_preprocess,
            strict,
        } => {
            let source = read_input(template.as_deref())?;
            let (data_text, format) = read_data(&data)?;
            let renderer = Renderer::new(RenderOptions {
                preprocess: !no_preprocess,
                strict_undefined: strict,
            });
            let rendered = renderer
                .render_data(&source, &data_text, format)
                .context("Failed to render template")?;
            info!("rendered {} bytes", rendered.len());
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Preprocess {
            input,
            output,
            explain,
        } => {
            let source = read_input(input.as_deref())?;
            let text = if explain {
                rewrites(&source)
                    .iter()
                    .map(|r| format!("{}: {} -> {}\n", r.rule, r.original, r.replacement.trim_start()))
                    .collect::<String>()
            } else {
                slicetpl_core::preprocess(&source)
            };
            write_output(output.as_deref(), &text)?;
        }
        Commands::Eval { expr, data, strict } => {
            let (data_text, format) = read_data(&data)?;
            let ctx = parse_context(&data_text, format).context("Failed to parse data")?;
            let renderer = Renderer::new(RenderOptions {
                preprocess: true,
                strict_undefined: strict,
            });
            let value = renderer
                .eval(&expr, ctx)
                .with_context(|| format!("Failed to evaluate expression: {}", expr))?;
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// Read the data file named by `--data` and settle its format.
///
/// Without `--data` the data block is empty. `--format` wins over the file
/// extension; with neither, JSON is assumed.
fn read_data(args: &DataArgs) -> Result<(String, DataFormat)> {
    let Some(path) = args.data.as_deref() else {
        return Ok((String::new(), args.format.unwrap_or_default()));
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read data file: {}", path))?;
    let format = args
        .format
        .or_else(|| DataFormat::detect(Path::new(path)))
        .unwrap_or_default();
    debug!("data file {} read as {}", path, format);
    Ok((text, format))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
