// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blattwerk — bind JPEG photos into one PDF, upright.
//
// Entry point. Initialises logging and configuration, selects the inputs and
// the destination (from arguments or native dialogs), and runs the
// conversion pipeline.

mod console;
mod paths;
mod services;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use blattwerk_core::config::CONFIG_FILE;
use blattwerk_core::error::BlattwerkError;
use blattwerk_core::human_errors::humanize_error;
use blattwerk_core::{AppConfig, ConversionJob, OutputDocument};
use blattwerk_document::{ConversionPipeline, PdfReader};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use console::{ConsoleObserver, OutputFormat};
use services::{data_dir, dialogs};

const AFTER_HELP: &str = r#"EXAMPLES:
  # Pick files and destination with dialogs
  blattwerk

  # Convert in the order given
  blattwerk IMG_0001.jpg IMG_0002.jpg -o album.pdf

  # Lower resolution pages, machine-readable progress
  blattwerk *.jpg -o album --dpi 72 --json
"#;

#[derive(Parser, Debug)]
#[command(
    name = "blattwerk",
    version,
    about = "Bind JPEG images into a single PDF, rotated upright from their EXIF orientation",
    after_help = AFTER_HELP
)]
struct Cli {
    /// JPEG files, one page each, in this order. Opens a file picker when empty.
    files: Vec<PathBuf>,

    /// Where to write the PDF (".pdf" is added if missing). Opens a save dialog when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixels per inch used to size pages.
    #[arg(long)]
    dpi: Option<f32>,

    /// Title stored in the PDF metadata.
    #[arg(long)]
    title: Option<String>,

    /// Skip re-reading the written PDF to check its pages.
    #[arg(long)]
    no_verify: bool,

    /// Read settings from this file instead of the data directory.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Store the effective settings in the data directory.
    #[arg(long)]
    save_config: bool,

    /// Print one JSON event per line instead of readable progress.
    #[arg(long)]
    json: bool,

    /// Debug-level logging on stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!("Blattwerk starting");

    let config = load_config(&cli)?;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let text = format == OutputFormat::Text;

    if text {
        println!("{}", "=".repeat(50));
        println!("Blattwerk: JPEG to PDF");
        println!("{}", "=".repeat(50));
    }

    // -- Inputs ---------------------------------------------------------------

    let interactive = cli.files.is_empty();
    let files = if interactive {
        match dialogs::pick_jpeg_files() {
            Some(files) => files,
            None => {
                if text {
                    println!("No files selected. Operation cancelled.");
                }
                return Ok(ExitCode::SUCCESS);
            }
        }
    } else {
        cli.files.clone()
    };

    let sources = match paths::collect_sources(&files, &config) {
        Ok(sources) => sources,
        Err(err) => return Ok(report_failure(&err, interactive)),
    };

    if text {
        println!("Selected {} file(s):", sources.len());
        for (i, source) in sources.iter().enumerate() {
            println!(
                "  {:2}. {} ({})",
                i + 1,
                source.display_name(),
                paths::megabytes(source.byte_size())
            );
        }
    }

    // -- Destination ----------------------------------------------------------

    let output = match cli.output.clone().or_else(dialogs::pick_output_file) {
        Some(path) => paths::ensure_pdf_extension(path),
        None => {
            if text {
                println!("No output location selected. Operation cancelled.");
            }
            return Ok(ExitCode::SUCCESS);
        }
    };
    if text {
        println!("PDF will be saved as: {}", paths::file_name(&output));
    }

    // -- Conversion -----------------------------------------------------------

    let result = ConversionJob::new(sources, output).and_then(|job| {
        let mut pipeline = ConversionPipeline::from_config(&config)
            .with_observer(Arc::new(ConsoleObserver::new(format)));
        let document = pipeline.run(&job)?;
        if config.verify_output {
            verify(&document)?;
        }
        Ok(document)
    });

    match result {
        Ok(document) => {
            if text {
                println!("PDF created successfully!");
                println!("  Pages:    {}", document.page_count());
                println!("  Location: {}", document.path.display());
                println!("  Size:     {}", paths::megabytes(document.byte_size));
            }
            if interactive {
                dialogs::show_info(
                    "Conversion complete",
                    &format!(
                        "Pages: {}\nLocation: {}\nSize: {}",
                        document.page_count(),
                        document.path.display(),
                        paths::megabytes(document.byte_size)
                    ),
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report_failure(&err, interactive)),
    }
}

/// Settings from `--config` or the data directory, with flags applied on top.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => data_dir::data_dir().join(CONFIG_FILE),
    };
    let mut config = match AppConfig::load_from(&path) {
        Ok(Some(config)) => config,
        Ok(None) => {
            if cli.config.is_some() {
                tracing::warn!(
                    path = %path.display(),
                    "settings file not found, using defaults"
                );
            }
            AppConfig::default()
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "settings file unreadable, using defaults"
            );
            AppConfig::default()
        }
    };

    if let Some(dpi) = cli.dpi {
        config.dpi = dpi;
    }
    if let Some(title) = &cli.title {
        config.document_title = title.clone();
    }
    if cli.no_verify {
        config.verify_output = false;
    }

    if cli.save_config {
        let dir = data_dir::data_dir();
        config
            .save(&dir)
            .with_context(|| format!("failed to save settings in {}", dir.display()))?;
        tracing::info!(dir = %dir.display(), "Settings saved");
    }

    tracing::debug!(?config, "Effective configuration");
    Ok(config)
}

/// Re-open the written PDF and check every page embeds its full RGB raster.
fn verify(document: &OutputDocument) -> blattwerk_core::error::Result<()> {
    PdfReader::open(&document.path)?.verify_pages(&document.pages)?;
    tracing::debug!(pages = document.page_count(), "Output verified");
    Ok(())
}

fn report_failure(err: &BlattwerkError, interactive: bool) -> ExitCode {
    let human = humanize_error(err);
    eprintln!("{}", human.message);
    eprintln!("  {}", human.suggestion);
    tracing::debug!(error = %err, severity = ?human.severity, "Reported failure");
    if interactive {
        dialogs::show_error(
            "Conversion error",
            &format!("{}\n\n{}", human.message, human.suggestion),
        );
    }
    ExitCode::FAILURE
}
