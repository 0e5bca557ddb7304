use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pagescribe::{
    Config, InputState,
    document::{BlankPageSource, PngPageSource},
    export::{self, PdfWriter},
    script::Script,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pagescribe")]
#[command(version, about = "Freehand ink annotation for multi-page documents")]
struct Cli {
    /// Directory of page images (*.png, one per page, ordered by file name)
    #[arg(long, short = 'p', value_name = "DIR", conflicts_with = "blank")]
    pages: Option<PathBuf>,

    /// Annotate this many blank A4 pages instead of a document
    #[arg(long, value_name = "N")]
    blank: Option<usize>,

    /// Event script (TOML) to replay onto the document
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Where to write the annotated PDF (default: from [export] config)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file to use instead of ~/.config/pagescribe/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the page render scale from the config
    #[arg(long, value_name = "SCALE")]
    render_scale: Option<f64>,

    /// Write a documented default config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::get_config_path()?,
        };
        Config::create_default_file(&path)?;
        println!("Created {}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(scale) = cli.render_scale {
        config.document.render_scale = scale;
        config.validate_and_clamp();
    }
    let render_scale = config.document.render_scale;

    let mut state = InputState::from_config(&config)?;

    let pages = match (&cli.pages, cli.blank) {
        (Some(dir), _) => state
            .load_document(PngPageSource::new(dir, render_scale))
            .with_context(|| format!("Failed to load pages from {}", dir.display()))?,
        (None, Some(count)) => state
            .load_document(BlankPageSource::a4(count, render_scale))
            .context("Failed to create blank pages")?,
        (None, None) => {
            return Err(anyhow::anyhow!(
                "No document given: pass --pages <DIR> or --blank <N>"
            ));
        }
    };
    log::info!("Loaded {pages} page(s) at scale {render_scale}");

    if let Some(path) = &cli.script {
        let script = Script::load(path)?;
        script.run(&mut state)?;
    }

    let output = match cli.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                export::ensure_directory_exists(parent)?;
            }
            path
        }
        None => export::output_path(&config.export)?,
    };

    let mut writer = PdfWriter::new(&output, render_scale);
    let written = state
        .export(&mut writer)
        .with_context(|| format!("Failed to export {}", output.display()))?;
    println!("{}", written.display());

    Ok(())
}
