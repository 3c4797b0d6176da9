//! lasview: browse, inspect and measure LiDAR detection clouds.
#![allow(clippy::uninlined_format_args)]

mod browse;
mod export;
mod text;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use lasview_core::config::{DEFAULT_MAX_FILES, DEFAULT_Z_SCALE_FACTOR};
use lasview_core::{
    centroid_coordinate, detection_id, ConfigError, ExportRow, LoadError, Viewer, ViewerConfig,
};
use lasview_io::{CloudLoader, FolderIngestor, IngestError, LasLoader};
use thiserror::Error;

use crate::text::TextSurface;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Ingest(#[from] IngestError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Batch export format.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

/// Engine settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct EngineArgs {
    /// Divisor applied to Z at load time (multiplied back when measuring)
    #[arg(long, default_value_t = DEFAULT_Z_SCALE_FACTOR)]
    z_scale: f64,

    /// Maximum number of point-cloud files accepted from one folder
    #[arg(long, default_value_t = DEFAULT_MAX_FILES)]
    max_files: usize,

    /// Load files in parallel
    #[arg(long)]
    parallel: bool,
}

impl EngineArgs {
    fn config(&self) -> Result<ViewerConfig> {
        let config = ViewerConfig::new()
            .with_z_scale_factor(self.z_scale)
            .with_max_files(self.max_files)
            .with_parallel_load(self.parallel);
        config.validate()?;
        Ok(config)
    }
}

/// LiDAR point-cloud detection browser.
#[derive(Parser)]
#[command(name = "lasview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a single LAS file
    Info {
        /// Input LAS file
        input: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Load a folder and list the files that loaded
    Ingest {
        /// Folder containing LAS files
        dir: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Export detection id and centroid coordinate for every file in a folder
    Export {
        /// Folder containing LAS files
        dir: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Browse a folder interactively (commands on stdin, 'help' for a list)
    Browse {
        /// Folder containing LAS files
        dir: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { input, engine } => {
            let config = engine.config()?;
            let record = LasLoader::new(&config).load(&input)?;
            let (z_min, z_max) = record.z_range();

            println!("File: {}", input.display());
            println!("Points: {}", record.len());
            println!("Colour: {}", record.color_mode());
            println!(
                "Z range: {:.3} - {:.3}",
                z_min * config.z_scale_factor,
                z_max * config.z_scale_factor
            );
            match detection_id(&record) {
                Ok(id) => println!("Detection ID: {}", id),
                Err(e) => println!("Detection ID: - ({})", e),
            }
            println!("Coordinates: {}", centroid_coordinate(&record));
        }

        Commands::Ingest { dir, engine } => {
            let records = FolderIngestor::new(&engine.config()?).ingest(&dir)?;
            println!("Loaded {} files from {}", records.len(), dir.display());
            for (index, record) in records.iter().enumerate() {
                println!(
                    "{:>3}  {:<40} {:>10} points  {}",
                    index,
                    record.file_name(),
                    record.len(),
                    record.color_mode()
                );
            }
        }

        Commands::Export {
            dir,
            format,
            output,
            engine,
        } => {
            let records = FolderIngestor::new(&engine.config()?).ingest(&dir)?;
            let rows: Vec<ExportRow> = records.iter().map(ExportRow::from_record).collect();

            let mut out: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(io::stdout().lock()),
            };
            match format {
                ExportFormat::Csv => export::write_csv(&rows, &mut out)?,
                ExportFormat::Json => export::write_json(&rows, &mut out)?,
            }
            if let Some(path) = output {
                eprintln!("Wrote {} rows to {}", rows.len(), path.display());
            }
        }

        Commands::Browse { dir, engine } => {
            let config = engine.config()?;
            let ingestor = FolderIngestor::new(&config);
            let records = ingestor.ingest(&dir)?;

            let mut viewer = Viewer::new(&config, TextSurface::default());
            println!("Loaded {} files, 'help' lists commands", records.len());
            viewer.load_records(records);

            let stdin = io::stdin();
            let mut stdout = io::stdout().lock();
            browse::run(&mut viewer, &ingestor, &dir, stdin.lock(), &mut stdout)?;
            log::debug!(
                "browse finished with {} measurement line(s) drawn",
                viewer.surface().line_count()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(z_scale: f64, max_files: usize) -> EngineArgs {
        EngineArgs {
            z_scale,
            max_files,
            parallel: false,
        }
    }

    #[test]
    fn test_engine_config_rejects_bad_values() {
        assert!(engine(DEFAULT_Z_SCALE_FACTOR, DEFAULT_MAX_FILES).config().is_ok());
        assert!(matches!(
            engine(0.0, DEFAULT_MAX_FILES).config(),
            Err(CliError::Config(ConfigError::InvalidZScale(_)))
        ));
        assert!(matches!(
            engine(-3.0, DEFAULT_MAX_FILES).config(),
            Err(CliError::Config(ConfigError::InvalidZScale(_)))
        ));
        assert!(matches!(
            engine(DEFAULT_Z_SCALE_FACTOR, 0).config(),
            Err(CliError::Config(ConfigError::ZeroMaxFiles))
        ));
    }

    #[test]
    fn test_cli_parses_z_scale() {
        let cli = Cli::parse_from(["lasview", "ingest", "/data", "--z-scale", "0"]);
        let Commands::Ingest { engine, .. } = cli.command else {
            panic!("expected ingest");
        };
        assert!(engine.config().is_err());
    }
}
