//! Inspect a Matrix Market file: shape, sparsity, norms and a product with ones
//!
//! Run with: cargo run --example market_cli -- path/to/matrix.mtx --compress

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use spmx::{market, ColumnMajor, Matrix, MatrixConfig, Norm, RowMajor, StorageOrder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(about = "SPMX market CLI - Load a Matrix Market file and report on it")]
struct Cli {
    /// Matrix Market coordinate file to load
    path: PathBuf,

    /// Store columns as primary lines (CSC when compressed)
    #[arg(long)]
    column_major: bool,

    /// Compress before running products and norms
    #[arg(long)]
    compress: bool,

    /// Zero tolerance applied on compression and products
    #[arg(long, default_value_t = spmx::DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Write the (possibly filtered) matrix back out to this path
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn main() -> spmx::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    if cli.column_major {
        run::<ColumnMajor>(&cli)
    } else {
        run::<RowMajor>(&cli)
    }
}

fn run<O: StorageOrder>(cli: &Cli) -> spmx::Result<()> {
    println!("Loading '{}'...", cli.path.display());
    let start = Instant::now();
    let loaded: Matrix<f64, O> = market::load(&cli.path)?;
    println!("Loaded in {:.3}ms", start.elapsed().as_secs_f64() * 1000.0);

    // Rebuild with the requested tolerance
    let config = MatrixConfig::default().with_tolerance(cli.tolerance);
    let (first, second) = loaded.storage_shape();
    let elements = loaded.coordinates().cloned().unwrap_or_default();
    let mut matrix: Matrix<f64, O> =
        Matrix::from_map_with_config(first, second, elements, config)?;

    if cli.compress {
        let start = Instant::now();
        matrix.compress();
        println!("Compressed in {:.3}ms", start.elapsed().as_secs_f64() * 1000.0);
    }

    println!("\nMatrix Information:");
    println!("   Shape: {} x {}", matrix.rows(), matrix.columns());
    println!("   Ordering: {}", matrix.order());
    println!("   Format: {}", matrix.format());
    println!("   Non-zeros: {}", matrix.nnz());
    println!("   Sparsity: {:.6}%", matrix.sparsity() * 100.0);

    println!("\nNorms:");
    for norm in Norm::ALL {
        println!("   {norm}: {:.6}", matrix.norm(norm));
    }

    let ones = vec![1.0; matrix.columns()];
    let start = Instant::now();
    let sums = matrix.mul_vector(&ones)?;
    let elapsed = start.elapsed();
    let total: f64 = sums.iter().sum();
    println!("\nRow sums computed in {elapsed:.2?} (total {total:.6})");

    if let Some(path) = &cli.dump {
        market::dump(&matrix, path)?;
        println!("Wrote '{}'", path.display());
    }

    Ok(())
}
