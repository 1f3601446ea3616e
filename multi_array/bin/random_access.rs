/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Sums random reads from a 32 × 32 grid addressed by `-16..16` on
//! both axes, and reports how long the reads took.
//!
//! ```text
//! RUST_LOG=info random_access --iterations 1000000 --seed 7 --mode fat
//! ```

use std::hint::black_box;
use std::time::Instant;

use anyhow::Result;
use anyhow::ensure;
use clap::Parser;
use clap::ValueEnum;
use multi_array::Matrix;
use multi_array::MultiArray;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing_subscriber::EnvFilter;

type Grid = Matrix<i32, 32, 32, -16, -16>;

/// How each element is read.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// `Matrix::at`, recomputing the rebase on every access.
    At,
    /// `Matrix::fat`, using the compile-time rebase.
    Fat,
    /// A `Rebased` handle created once before the loop.
    Rebased,
}

#[derive(Parser, Debug)]
struct Cli {
    /// Number of random reads
    #[arg(long, default_value_t = 100_000_000)]
    iterations: u64,

    /// Seed for the random number generator; random if unset
    #[arg(long)]
    seed: Option<u64>,

    /// Access mode to exercise
    #[arg(long, value_enum, default_value_t = Mode::At)]
    mode: Mode,
}

#[tracing::instrument(skip(grid, rng))]
fn sum_reads(grid: &Grid, rng: &mut SmallRng, iterations: u64, mode: Mode) -> i64 {
    let mut sum: i64 = 0;
    match mode {
        Mode::At => {
            for _ in 0..iterations {
                let (i, j) = (rng.gen_range(-16..=15), rng.gen_range(-16..=15));
                sum += i64::from(*grid.at(i, j));
            }
        }
        Mode::Fat => {
            for _ in 0..iterations {
                let (i, j) = (rng.gen_range(-16..=15), rng.gen_range(-16..=15));
                sum += i64::from(*grid.fat(i, j));
            }
        }
        Mode::Rebased => {
            let view = grid.rebased();
            for _ in 0..iterations {
                let (i, j) = (rng.gen_range(-16..=15), rng.gen_range(-16..=15));
                sum += i64::from(*view.at([i, j]));
            }
        }
    }
    sum
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    ensure!(cli.iterations > 0, "--iterations must be positive");

    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let grid = Grid::from_fn(|_| rng.gen_range(-1000..=1000));
    tracing::debug!(layout = %Grid::LAYOUT, rebase = Grid::REBASE, "filled grid");

    let start = Instant::now();
    let sum = sum_reads(black_box(&grid), &mut rng, cli.iterations, cli.mode);
    let elapsed = start.elapsed();

    tracing::info!(
        sum,
        iterations = cli.iterations,
        mode = ?cli.mode,
        elapsed_ms = elapsed.as_millis() as u64,
        "done"
    );
    println!("{}", sum);
    println!("{} ms", elapsed.as_millis());
    Ok(())
}
