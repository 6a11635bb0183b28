use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use splicetrack_core::{
    build_samples, parse_color, scale_introns, CoordinateStore, SampleOptions, SqliteStore,
};
use splicetrack_render::{figure_title, FigureExporter, PlotComposer};

mod browser;
mod config;
mod error;

use config::Config;
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "splicetrack")]
#[command(about = "SpliceTrack - transcript coverage and splice junction plots")]
#[command(version)]
#[command(long_about = "
SpliceTrack draws one sub-plot per sample database: exons shaded by coverage,
canonical junction arcs above the exons and backsplice loops below them.
The figure is written as <name>.svg together with a <name>.html page.

Examples:
  splicetrack -t ENST00000275493 -d ctrl.db -d treated.db
  splicetrack -g EGFR -s 10 -n -d ctrl.db -d treated.db --repress-open
  splicetrack -g EGFR -c blue --reduce-canonical 5 -d sample.db --out-dir plots
")]
pub struct Cli {
    /// Divide every intron length by this factor
    #[arg(short = 's', long)]
    pub intron_scale: Option<f64>,

    /// Sample database (repeat for multiple samples)
    #[arg(short = 'd', long = "database", required_unless_present = "print_config", num_args = 1..)]
    pub databases: Vec<PathBuf>,

    /// Exon color: hex ("#4286f4") or name ("red")
    #[arg(short, long)]
    pub color: Option<String>,

    /// Transcript ID to plot
    #[arg(short, long)]
    pub transcript: Option<String>,

    /// Gene symbol; plots its longest transcript and overrides --transcript
    #[arg(short, long)]
    pub gene: Option<String>,

    /// Normalize coverage colors across all samples
    #[arg(short, long)]
    pub normalize: bool,

    /// Divide canonical junction counts by this value
    #[arg(long, value_name = "N")]
    pub reduce_canonical: Option<u32>,

    /// Divide backsplice junction counts by this value
    #[arg(long, value_name = "N")]
    pub reduce_backsplice: Option<u32>,

    /// Do not open the figure in a browser
    #[arg(long)]
    pub repress_open: bool,

    /// Directory for the .svg and .html outputs
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print an example configuration file and exit
    #[arg(long)]
    pub print_config: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    pub quiet: bool,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Check inputs in order: database paths, then selector.
fn validate(cli: &Cli) -> Result<(), CliError> {
    if let Some(missing) = cli.databases.iter().find(|path| !path.exists()) {
        return Err(CliError::database_not_found(missing.clone()));
    }
    if cli.gene.is_none() && cli.transcript.is_none() {
        return Err(CliError::MissingSelector);
    }
    Ok(())
}

/// Transcript to plot: the gene's longest transcript when a gene is given.
fn resolve_transcript(cli: &Cli, store: &SqliteStore) -> Result<String, CliError> {
    match (&cli.gene, &cli.transcript) {
        (Some(gene), _) => {
            let transcript = store.longest_transcript(gene)?;
            log::info!("Gene {} -> longest transcript {}", gene, transcript);
            Ok(transcript)
        }
        (None, Some(transcript)) => Ok(transcript.clone()),
        (None, None) => Err(CliError::MissingSelector),
    }
}

fn provenance(cli: &Cli, title: &str) -> String {
    let samples: Vec<String> = cli
        .databases
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    let mut lines = vec![
        format!("splicetrack {}", env!("CARGO_PKG_VERSION")),
        format!("figure: {}", title),
        format!("databases: {}", samples.join(", ")),
    ];
    if let Some(scale) = cli.intron_scale {
        lines.push(format!("intron scale: {}", scale));
    }
    lines.join("\n")
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    validate(cli)?;

    let reference = SqliteStore::new(&cli.databases[0]).map_err(CliError::from)?;
    let transcript = resolve_transcript(cli, &reference)?;
    let model = reference.exons(&transcript).map_err(CliError::from)?;
    log::info!(
        "{}: {} exons on {} ({})",
        transcript,
        model.exons.len(),
        model.chromosome,
        model.strand.as_str()
    );

    let scaled = cli.intron_scale.map(|factor| scale_introns(&model.exons, factor));

    let sources = cli
        .databases
        .iter()
        .map(|path| {
            let store = SqliteStore::new(path)?;
            Ok((store.sample_name(), store))
        })
        .collect::<Result<Vec<_>, splicetrack_core::StoreError>>()
        .map_err(CliError::from)?;

    let color_spec = cli.color.as_deref().unwrap_or(&config.style.exon_color);
    let options = SampleOptions {
        color: parse_color(color_spec),
        normalize: cli.normalize,
        reduce_canonical: cli.reduce_canonical,
        reduce_backsplice: cli.reduce_backsplice,
    };
    let samples = build_samples(&sources, &model, scaled.as_deref(), &options)
        .map_err(CliError::from)?;

    let title = figure_title(&transcript, cli.gene.as_deref());
    let exons = scaled.as_deref().unwrap_or(model.exons.as_slice());

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Failed to create output directory: {}", cli.out_dir.display()))?;

    let composer = PlotComposer::new(config.figure_style(), config.figure_config(), config.curve_params());
    let exporter = FigureExporter::new(composer).with_provenance(provenance(cli, &title));
    let written = exporter
        .export(&cli.out_dir, exons, &samples, &title)
        .context("Failed to render figure")?;

    if cli.repress_open {
        log::info!("Figure written to {}", written.html.display());
    } else {
        browser::open_in_browser(&written.html);
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if cli.print_config {
        match Config::example_toml() {
            Ok(example) => {
                print!("{}", example);
                return;
            }
            Err(e) => print_error_and_exit(&CliError::config(format!("{:#}", e))),
        }
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => print_error_and_exit(&CliError::config(format!("{:#}", e))),
    };

    if let Err(err) = run(&cli, &config) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => print_error_and_exit(cli_err),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}
