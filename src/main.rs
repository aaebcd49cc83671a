//! dapmath - inspect how a dataset descriptor maps onto the typed data model.

use anyhow::{Context, Result};
use clap::Parser;
use dapmath::adapter::VariableAdapterFactory;
use dapmath::attribute_data::table_data;
use dapmath::config::ConversionConfig;
use dapmath::source::DatasetReader;
use dapmath::util::{format_adapter_tree, format_data, format_sets};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dapmath")]
#[command(about = "Map a DAP-style dataset descriptor onto a typed numeric model", long_about = None)]
struct Args {
    /// Path to the JSON dataset descriptor
    descriptor: PathBuf,

    /// JSON conversion configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only show this variable
    #[arg(long)]
    variable: Option<String>,

    /// Print the adapter tree of every variable
    #[arg(long)]
    tree: bool,

    /// Materialize and print the values carried by the descriptor
    #[arg(long)]
    values: bool,

    /// Print the global attributes as data
    #[arg(long)]
    globals: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting dapmath");
    }

    let config = match &args.config {
        Some(path) => ConversionConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => ConversionConfig::default(),
    };

    let info = DatasetReader::read_file(&args.descriptor)
        .with_context(|| format!("Failed to read descriptor {}", args.descriptor.display()))?;
    let dataset = &info.dataset;
    let mut factory = VariableAdapterFactory::new(config);

    if let Some(name) = &args.variable {
        if !dataset.variables.iter().any(|v| &v.name == name) {
            anyhow::bail!("Variable '{}' not found in {}", name, info.file_path.display());
        }
    }

    for variable in &dataset.variables {
        if args.variable.as_ref().is_some_and(|name| name != &variable.name) {
            continue;
        }

        let table = dataset.attribute_table(&variable.name);
        let adapter = factory
            .variable_adapter(variable, table)
            .with_context(|| format!("Failed to adapt variable '{}'", variable.name))?;

        println!("{}: {}", variable.name, adapter.math_type());
        println!("  sets: {}", format_sets(adapter.representational_sets()));

        if args.tree {
            for line in format_adapter_tree(&adapter).lines() {
                println!("  {}", line);
            }
        }

        if args.values {
            match dataset.value(&variable.name) {
                Some(value) => {
                    let data = adapter
                        .data(value)
                        .with_context(|| format!("Failed to convert values of '{}'", variable.name))?;
                    let text = format_data(&data)
                        .with_context(|| format!("Failed to materialize '{}'", variable.name))?;
                    for line in text.lines() {
                        println!("  {}", line);
                    }
                },
                None => println!("  (no values)"),
            }
        }
    }

    if args.globals {
        match dataset.global_attributes() {
            Some(table) => match table_data(table).context("Failed to convert global attributes")? {
                Some(data) => print!("{}", format_data(&data)?),
                None => println!("(no convertible global attributes)"),
            },
            None => println!("(no global attributes)"),
        }
    }

    if args.log.is_some() {
        tracing::info!("dapmath exited");
    }

    Ok(())
}
