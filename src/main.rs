use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tga_edit::codec;
use tga_edit::pipeline::{Operation, Pipeline, OPERATIONS};
use tga_edit::PipelineConfig;

#[derive(Parser)]
#[command(name = "tga-edit")]
#[command(about = "Quantize, dither, filter and resample Targa and PNG images")]
struct Cli {
    /// Log every step at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply operations given on the command line
    Apply {
        /// Image to read
        input: PathBuf,

        /// Image to write (.tga or .png)
        output: PathBuf,

        /// Operation to apply, repeatable (e.g. -o grayscale -o rotate:30)
        #[arg(short = 'o', long = "op", required = true)]
        ops: Vec<Operation>,

        /// Seed for the random dither
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a YAML pipeline file
    Run {
        /// Pipeline file
        pipeline: PathBuf,
    },
    /// List supported operations
    Ops,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Apply {
            input,
            output,
            ops,
            seed,
        } => run_apply_command(&input, &output, ops, seed),
        Commands::Run { pipeline } => run_pipeline_command(&pipeline),
        Commands::Ops => {
            run_ops_command();
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "tga_edit=debug,raster_ops=debug"
    } else {
        "tga_edit=info,raster_ops=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load, transform and save one image
fn process(input: &Path, output: &Path, mut pipeline: Pipeline) -> anyhow::Result<()> {
    let mut raster = codec::load(input)?;
    tracing::info!(
        input = %input.display(),
        width = raster.width(),
        height = raster.height(),
        steps = pipeline.steps().len(),
        "Processing"
    );
    pipeline.run(&mut raster)?;
    codec::save(output, &raster)?;
    println!(
        "Wrote {} ({}x{})",
        output.display(),
        raster.width(),
        raster.height()
    );
    Ok(())
}

fn run_apply_command(
    input: &Path,
    output: &Path,
    ops: Vec<Operation>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    process(input, output, Pipeline::new(ops, seed))
}

fn run_pipeline_command(path: &Path) -> anyhow::Result<()> {
    let config = PipelineConfig::load(path)?;
    let pipeline = config.pipeline()?;
    process(&config.input, &config.output, pipeline)
}

fn run_ops_command() {
    let width = OPERATIONS
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    println!("Operations:\n");
    for (name, description) in OPERATIONS {
        println!("  {name:<width$}  {description}");
    }
}
