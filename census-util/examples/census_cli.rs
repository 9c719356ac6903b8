use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};

use census_util::{
    fetch_json, par_is_nonnegative_integral, validate_partition, BuildProvenance, ChunkConfig,
    ChunkStatsSink, ChunkedProcessor, CollectingSink, Error, Matrix, DEFAULT_TARGET_NNZ,
};

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Census build utilities - chunk count matrices, fetch JSON manifests, report provenance")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Slice a JSON-encoded matrix into chunks and report their sizes
    Chunk {
        /// Path to a matrix serialized as JSON
        matrix: PathBuf,

        /// Target stored values per chunk
        #[arg(long, default_value_t = DEFAULT_TARGET_NNZ)]
        target_nnz: usize,

        /// Check that the chunks reproduce the matrix exactly
        #[arg(long)]
        verify: bool,
    },
    /// Fetch a JSON document and pretty-print it
    Fetch {
        url: String,

        /// Seconds to wait after the response
        #[arg(long, default_value_t = 0.0)]
        delay_secs: f64,
    },
    /// Print the commit hash and dirty state of the current checkout
    Provenance,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let start_time = std::time::Instant::now();

    match cli.command {
        Commands::Chunk {
            matrix,
            target_nnz,
            verify,
        } => handle_chunk(&matrix, target_nnz, verify)?,
        Commands::Fetch { url, delay_secs } => {
            let delay = Duration::try_from_secs_f64(delay_secs)
                .map_err(|e| format!("invalid --delay-secs {delay_secs}: {e}"))?;
            let value = fetch_json(&url, delay).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Provenance => {
            let provenance = BuildProvenance::collect()?;
            println!("{}", serde_json::to_string_pretty(&provenance)?);
        }
    }

    log::info!("completed in {:.2?}", start_time.elapsed());
    Ok(())
}

fn handle_chunk(
    path: &Path,
    target_nnz: usize,
    verify: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let matrix: Matrix<f64> = serde_json::from_str(&text)?;

    println!("Format: {} ({})", matrix.format(), matrix.data_type());
    println!("Raw counts: {}", par_is_nonnegative_integral(&matrix));

    let processor = ChunkedProcessor::new(&matrix, ChunkConfig::with_target_nnz(target_nnz));
    let plan = processor.plan()?;
    println!(
        "Plan: {} chunks of {} {} (average density {})",
        plan.chunk_count, plan.stride, plan.axis, plan.density
    );

    let summary = processor.run(ChunkStatsSink::new())?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if verify {
        let chunks = processor.run(CollectingSink::new())?;
        validate_partition(&matrix, &chunks).map_err(Error::from)?;
        println!("Verified: {} chunks partition the matrix", chunks.len());
    }

    Ok(())
}
