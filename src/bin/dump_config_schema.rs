//! Prints the JSON schema of `config.toml`, for editor integration.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dump_config_schema")]
#[command(about = "Print the JSON schema of the pagescribe config file")]
struct Cli {
    /// Write the schema to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let schema = serde_json::to_string_pretty(&pagescribe::Config::json_schema())?;

    match cli.output {
        Some(path) => std::fs::write(&path, schema)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?,
        None => println!("{schema}"),
    }
    Ok(())
}
