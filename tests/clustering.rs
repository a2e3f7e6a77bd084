use dbscan_auto::{
    ClusteringConfig, DBSCAN, Dataset, DistanceMatrix, Estimate, LinearScan, Point, estimate_mu,
    expand, find_elbow, run, silhouette_samples, silhouette_score,
};
use ndarray::Array2;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Two square blobs of `per_blob` points, side `spread`, centered `gap` apart.
fn two_blobs(per_blob: usize, spread: f64, gap: f64, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let offsets = Array2::random_using((2 * per_blob, 2), Uniform::new(0.0, spread), &mut rng);

    Dataset::from_points((0..2 * per_blob).map(|i| {
        let shift = if i < per_blob { 0.0 } else { gap };
        Point::new(
            format!("p{i}"),
            offsets[[i, 0]] + shift,
            offsets[[i, 1]] + shift,
        )
    }))
}

#[test]
fn scenario_three_in_a_row_plus_outlier() {
    let data = Dataset::parse("A,0,0\nB,0,1\nC,0,2\nD,10,10\n").unwrap();
    let result = run(&data, &ClusteringConfig::new().eps(1.5).min_samples(2)).unwrap();

    let rows: Vec<(&str, i32)> = result
        .assignments(&data)
        .map(|(id, cluster, _)| (id, cluster))
        .collect();
    assert_eq!(rows, vec![("A", 1), ("B", 1), ("C", 1), ("D", -1)]);
    assert_eq!(result.n_clusters, 1);
    assert_eq!(result.n_noise, 1);
}

#[test]
fn scenario_estimate_mu_tries_three_candidates() {
    let data = Dataset::parse("A,0,0\nB,0,1\nC,0,2\nD,10,10\n").unwrap();
    let estimate = estimate_mu(&data, 1.5).unwrap();

    let tried: Vec<usize> = estimate.candidates.iter().map(|c| c.min_samples).collect();
    assert_eq!(tried, vec![1, 2, 4]);
    let best = estimate
        .candidates
        .iter()
        .map(|c| c.silhouette)
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(estimate.silhouette, best);
}

#[test]
fn separated_blobs_score_near_one() {
    let data = two_blobs(20, 1.0, 100.0, 7);
    let mut dbscan = DBSCAN::new(1.5, 3);
    let labels = dbscan.fit_predict(&data).unwrap();

    assert_eq!(dbscan.get_n_clusters(), Some(2));
    assert!(labels.iter().take(20).all(|&l| l == 1));
    assert!(labels.iter().skip(20).all(|&l| l == 2));
    assert!(dbscan.silhouette_score().unwrap() > 0.95);
}

#[test]
fn estimators_recover_blobs() {
    let data = two_blobs(25, 1.0, 50.0, 11);

    let result = run(&data, &ClusteringConfig::new().min_samples(4)).unwrap();
    assert!(matches!(result.estimate, Some(Estimate::Eps(eps)) if eps > 0.0 && eps < 2f64.sqrt()));
    assert!(result.n_clusters >= 1);
    // An eps below the blob diameter can split a blob but never bridge the gap.
    for cluster in 1..=result.n_clusters as i32 {
        let members = result.members(cluster);
        assert!(members.iter().all(|&i| i < 25) || members.iter().all(|&i| i >= 25));
    }

    let result = run(&data, &ClusteringConfig::new().eps(1.5)).unwrap();
    assert!(matches!(result.estimate, Some(Estimate::MinSamples(_))));
    assert!(result.silhouette > 0.9);
}

#[test]
fn straight_k_distance_curve_still_has_an_elbow() {
    let curve: Vec<f64> = (0..10).map(|i| 9.0 - i as f64).collect();
    assert_eq!(find_elbow(&curve), Some(0));
}

#[test]
fn cached_and_scanned_queries_agree() {
    let data = two_blobs(15, 2.0, 3.0, 3);
    for (eps, mu) in [(0.5, 2), (1.0, 3), (2.0, 4)] {
        let scanned = expand(&LinearScan::new(&data), eps, mu);
        let cached = expand(&DistanceMatrix::new(&data), eps, mu);
        assert_eq!(scanned, cached);
    }
}

proptest! {
    #[test]
    fn silhouette_stays_in_bounds(
        coords in proptest::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 0..40),
        eps in 0.0f64..20.0,
        mu in 0usize..6,
    ) {
        let data = Dataset::from_points(
            coords.iter().enumerate().map(|(i, &(x, y))| Point::new(i.to_string(), x, y)),
        );
        let query = DistanceMatrix::new(&data);
        let expansion = expand(&query, eps, mu);
        let scores = silhouette_samples(&query, &expansion.labels);

        for &score in scores.iter() {
            prop_assert!((-1.0..=1.0).contains(&score), "score {} out of range", score);
        }
        let average = silhouette_score(&scores, &expansion.labels);
        prop_assert!((-1.0..=1.0).contains(&average));

        for &label in expansion.labels.iter() {
            prop_assert!(label == -1 || (label >= 1 && label as usize <= expansion.n_clusters));
        }
    }

    #[test]
    fn repeated_expansion_is_deterministic(
        coords in proptest::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 1..30),
        eps in 0.1f64..5.0,
        mu in 1usize..5,
    ) {
        let data = Dataset::from_points(
            coords.iter().enumerate().map(|(i, &(x, y))| Point::new(i.to_string(), x, y)),
        );
        let query = LinearScan::new(&data);
        prop_assert_eq!(expand(&query, eps, mu), expand(&query, eps, mu));
    }
}
