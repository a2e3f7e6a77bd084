use dbscan_auto::{ClusterReport, ClusteringConfig, Dataset, Point, estimate_eps, estimate_mu, run};
use ndarray::Array2;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(7);
    let offsets = Array2::random_using((60, 2), Uniform::new(0.0, 1.5), &mut rng);
    let data = Dataset::from_points((0..60).map(|i| {
        let shift = if i < 30 { 0.0 } else { 6.0 };
        Point::new(format!("p{i}"), offsets[[i, 0]] + shift, offsets[[i, 1]])
    }));

    println!("=== Estimating min_samples (eps = 0.5) ===");
    let mu = estimate_mu(&data, 0.5)?;
    for candidate in &mu.candidates {
        println!(
            "  min_samples={} -> {} clusters, silhouette {:.4}",
            candidate.min_samples, candidate.n_clusters, candidate.silhouette
        );
    }
    println!("  chosen: {}\n", mu.min_samples);

    println!("=== Estimating eps (min_samples = 4) ===");
    let eps = estimate_eps(&data, 4)?;
    println!(
        "  k-distance curve: {} points, elbow at index {} -> eps = {:.4}\n",
        eps.curve.len(),
        eps.elbow_index,
        eps.eps
    );

    println!("=== Full run with estimated eps ===");
    let result = run(&data, &ClusteringConfig::new().min_samples(4))?;
    print!("{}", ClusterReport::new(&data, &result));

    Ok(())
}
