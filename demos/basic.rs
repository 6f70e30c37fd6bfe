//! Basic example demonstrating medkmeans-rs usage
//!
//! Run with: cargo run --example basic --release
//!
//! Set `RUST_LOG=debug` to see every refinement pass.

use medkmeans_rs::{FeatureSchema, KMeansConfig, MedoidKMeans, Record};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct Sample {
    id: usize,
    x: f64,
    y: f64,
}

impl Record for Sample {
    fn schema() -> FeatureSchema<Self> {
        FeatureSchema::new()
            .feature("x", |s: &Sample| s.x)
            .feature("y", |s: &Sample| s.y)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== medkmeans-rs example ===\n");

    // Generate synthetic data: 3 clusters in 2D for easy visualization
    let n_samples = 300;
    let n_clusters = 3;

    let centers = [[-5.0, -5.0], [0.0, 5.0], [5.0, -5.0]];
    let noise: Array2<f64> = Array2::random((n_samples, 2), Uniform::new(-1.0, 1.0));

    let samples: Vec<Sample> = (0..n_samples)
        .map(|i| {
            let center = centers[i % n_clusters];
            Sample {
                id: i,
                x: center[0] + noise[[i, 0]],
                y: center[1] + noise[[i, 1]],
            }
        })
        .collect();

    println!("True cluster centers:");
    for (i, center) in centers.iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, center[0], center[1]);
    }
    println!();

    // Seed one centroid from each blob
    let config = KMeansConfig::new(n_clusters)
        .with_max_iters(100)
        .with_initial_centroids(Some(vec![0, 1, 2]));

    println!("Running medoid k-means with k={}...\n", n_clusters);

    let model = MedoidKMeans::with_config(config);
    let result = model.cluster_records(&samples).expect("Clustering failed");

    println!(
        "{} after {} iterations, total distance {:.4}\n",
        if result.converged() {
            "Converged"
        } else {
            "Stopped"
        },
        result.n_iterations(),
        result.total_distance()
    );

    for (cluster, group) in result.groups().iter().enumerate() {
        let mean = result.mean(cluster);
        print!(
            "  Cluster {}: {} samples, mean ({:.4}, {:.4})",
            cluster,
            group.len(),
            mean[0],
            mean[1]
        );
        match result.centroid_indices()[cluster] {
            Some(idx) => println!(", medoid sample #{}", samples[idx].id),
            None => println!(", no medoid"),
        }
    }
    println!();

    println!("First 10 sample assignments:");
    for sample in samples.iter().take(10) {
        println!(
            "  Sample {} at ({:.2}, {:.2}) -> Cluster {}",
            sample.id,
            sample.x,
            sample.y,
            result.labels()[sample.id]
        );
    }

    println!("\n=== Done! ===");
}
