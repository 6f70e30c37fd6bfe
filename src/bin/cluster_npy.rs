//! Cluster the rows of a .npy matrix
//!
//! Reads an `f64` matrix of shape (n_samples, n_features), runs medoid
//! k-means with Euclidean distance and writes one `i64` label per row.
//!
//! Usage: `cluster-npy <input.npy> <labels.npy> <k> <seed> <max_iters>`
//!
//! Set `RUST_LOG=medkmeans_rs=debug` to follow each refinement pass.

use medkmeans_rs::{KMeansConfig, MedoidKMeans};
use ndarray::{Array1, Array2};
use ndarray_npy::{ReadNpyExt, WriteNpyExt};
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 6 {
        eprintln!(
            "Usage: {} <input.npy> <labels.npy> <k> <seed> <max_iters>",
            program_name(&args)
        );
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];
    let k: usize = args[3].parse()?;
    let seed: u64 = args[4].parse()?;
    let max_iters: usize = args[5].parse()?;

    let reader = BufReader::new(File::open(input_path)?);
    let data: Array2<f64> = Array2::read_npy(reader)?;

    eprintln!(
        "Loaded data: {} samples x {} features",
        data.nrows(),
        data.ncols()
    );

    let config = KMeansConfig::new(k)
        .with_seed(seed)
        .with_max_iters(max_iters);
    let result = MedoidKMeans::with_config(config).fit(&data.view())?;

    let labels: Array1<i64> = result.labels().iter().map(|&label| label as i64).collect();
    let writer = BufWriter::new(File::create(output_path)?);
    labels.write_npy(writer)?;

    println!(
        "{} after {} iterations, total distance {:.6}",
        if result.converged() {
            "Converged"
        } else {
            "Stopped"
        },
        result.n_iterations(),
        result.total_distance()
    );
    for (cluster, (group, centroid)) in result
        .groups()
        .iter()
        .zip(result.centroid_indices())
        .enumerate()
    {
        match centroid {
            Some(idx) => println!(
                "  Cluster {}: {} samples, centroid row {}",
                cluster,
                group.len(),
                idx
            ),
            None => println!("  Cluster {}: {} samples, no centroid", cluster, group.len()),
        }
    }

    eprintln!("Saved labels to {}", output_path);

    Ok(())
}

fn program_name(args: &[String]) -> &str {
    args.first().map_or("cluster-npy", String::as_str)
}
