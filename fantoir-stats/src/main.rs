//! Point d'entrée CLI pour fantoir-stats

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

mod analyse;
mod chart;
mod cli;
mod config;
mod export;
mod geometry;
mod merge;
mod report;

use cli::Commands;

/// Statistiques des types de voie FANTOIR par commune
#[derive(Parser)]
#[command(name = "fantoir-stats")]
#[command(author, version)]
#[command(about = "Statistiques des types de voie FANTOIR par commune")]
#[command(
    long_about = "Analyse le référentiel FANTOIR (voies et communes), classe les communes par type de voie et fusionne les agrégats sur les contours communaux pour export FlatGeobuf ou GeoJSON."
)]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Rank {
            source,
            type_voie,
            top,
            by,
            min_voies,
            commune,
            insee,
        } => cli::cmd_rank(
            &source,
            &type_voie,
            top,
            by,
            min_voies,
            commune.as_deref(),
            insee.as_deref(),
        ),
        Commands::Export {
            source,
            geometry,
            output,
            format,
            config,
        } => cli::cmd_export(&source, &geometry, &output, format, config.as_ref()),
        Commands::Chart {
            source,
            kind,
            commune,
            insee,
            type_voie,
            geometry,
            output,
        } => cli::cmd_chart(
            &source,
            kind,
            commune,
            insee,
            &type_voie,
            geometry.as_ref(),
            output.as_ref(),
        ),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
