use dbscan_auto::{ClusterReport, ClusteringConfig, DBSCAN, Dataset, Point, run};
use ndarray::Array2;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Normal;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== DBSCAN Clustering ===\n");

    // Three gaussian blobs plus a few far-away points.
    let centers = [(2.0, 2.0), (8.0, 8.0), (2.0, 8.0)];
    let mut rng = StdRng::seed_from_u64(42);
    let jitter = Array2::random_using((15 * centers.len(), 2), Normal::new(0.0, 0.4)?, &mut rng);

    let mut points = Vec::new();
    for (c, &(cx, cy)) in centers.iter().enumerate() {
        for i in 0..15 {
            let row = c * 15 + i;
            points.push(Point::new(
                format!("c{c}-{i}"),
                cx + jitter[[row, 0]],
                cy + jitter[[row, 1]],
            ));
        }
    }
    points.push(Point::new("noise-1", 5.0, 5.0));
    points.push(Point::new("noise-2", 0.0, 14.0));
    points.push(Point::new("noise-3", 12.0, 0.0));
    let data = Dataset::from_points(points);

    println!("Dataset: {} samples", data.n_samples());
    println!("Expected: 3 natural clusters + some noise points\n");

    let configs = [
        (0.3, 3, "Tight clusters"),
        (0.8, 3, "Medium density"),
        (2.0, 3, "Loose clusters"),
        (0.8, 6, "Higher min_samples"),
    ];

    for &(eps, min_samples, description) in &configs {
        let mut dbscan = DBSCAN::new(eps, min_samples);
        dbscan.fit(&data)?;
        println!(
            "DBSCAN(eps={}, min_samples={}): {} - {} clusters, {} noise points, silhouette {:.4}",
            eps,
            min_samples,
            description,
            dbscan.get_n_clusters().unwrap_or(0),
            dbscan.get_n_noise_points().unwrap_or(0),
            dbscan.silhouette_score().unwrap_or(0.0),
        );
    }

    println!("\n=== Detailed Report (eps=0.8, min_samples=3) ===\n");
    let result = run(&data, &ClusteringConfig::new().eps(0.8).min_samples(3))?;
    print!("{}", ClusterReport::new(&data, &result));

    Ok(())
}
