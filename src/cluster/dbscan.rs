use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::metrics::{silhouette_samples, silhouette_score};
use crate::neighbors::{DistanceMatrix, LinearScan, NeighborhoodQuery};
use crate::{Assignment, Vector};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Tag of a point that has not been visited yet.
pub const UNCLASSIFIED: i32 = 0;
/// Tag of a point that was not density-reachable when it was visited.
pub const NOISE: i32 = -1;

/// Outcome of one expansion pass over a dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Expansion {
    pub labels: Assignment,
    /// `core[i]` is true when point `i`'s own neighborhood met `min_samples`.
    pub core: Vec<bool>,
    pub n_clusters: usize,
}

impl Expansion {
    pub fn n_noise(&self) -> usize {
        self.labels.iter().filter(|&&label| label == NOISE).count()
    }

    pub fn core_indices(&self) -> Vec<usize> {
        self.core
            .iter()
            .enumerate()
            .filter(|&(_, &is_core)| is_core)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Run one DBSCAN pass and return a fresh assignment.
///
/// Points are visited in stored order and each cluster grows from a FIFO
/// worklist. A point tagged noise earlier in the pass is reclaimed when a
/// later core point reaches it, so the result depends on input order. When a
/// new core point is found every point in its neighborhood is tagged with the
/// new cluster, including border points an earlier cluster already claimed.
pub fn expand<Q>(query: &Q, eps: f64, min_samples: usize) -> Expansion
where
    Q: NeighborhoodQuery + ?Sized,
{
    let n_samples = query.len();
    let mut labels = Assignment::from_elem(n_samples, UNCLASSIFIED);
    let mut core = vec![false; n_samples];
    let mut cluster = UNCLASSIFIED;

    for point_idx in 0..n_samples {
        if labels[point_idx] != UNCLASSIFIED {
            continue;
        }

        let seeds = query.region_query(point_idx, eps);
        if seeds.len() < min_samples {
            labels[point_idx] = NOISE;
            continue;
        }

        cluster += 1;
        core[point_idx] = true;
        for &seed in &seeds {
            labels[seed] = cluster;
        }

        let mut queue: VecDeque<usize> = seeds.into_iter().filter(|&s| s != point_idx).collect();

        while let Some(current) = queue.pop_front() {
            let result = query.region_query(current, eps);
            if result.len() < min_samples {
                continue;
            }

            core[current] = true;
            for neighbor in result {
                match labels[neighbor] {
                    UNCLASSIFIED => {
                        queue.push_back(neighbor);
                        labels[neighbor] = cluster;
                    }
                    NOISE => {
                        trace!(point = neighbor, cluster, "reclaimed noise point");
                        labels[neighbor] = cluster;
                    }
                    _ => {}
                }
            }
        }

        debug!(cluster, seed = point_idx, "expanded cluster");
    }

    Expansion {
        labels,
        core,
        n_clusters: cluster as usize,
    }
}

#[derive(Clone, Debug)]
pub struct DBSCAN {
    pub labels: Option<Assignment>,
    pub scores: Option<Vector>,
    pub core_sample_indices: Option<Vec<usize>>,
    n_clusters: Option<usize>,
    eps: f64,
    min_samples: usize,
    precompute_distances: bool,
}

impl DBSCAN {
    /// `min_samples` counts the point itself. Zero is accepted and makes every
    /// point a core point.
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self {
            labels: None,
            scores: None,
            core_sample_indices: None,
            n_clusters: None,
            eps,
            min_samples,
            precompute_distances: false,
        }
    }

    /// Answer neighborhood queries from a pairwise distance cache instead of
    /// rescanning the coordinates. Output is unchanged.
    pub fn precompute_distances(mut self, precompute: bool) -> Self {
        self.precompute_distances = precompute;
        self
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    pub fn fit(&mut self, data: &Dataset) -> Result<()> {
        self.fit_predict(data).map(|_| ())
    }

    pub fn fit_predict(&mut self, data: &Dataset) -> Result<Assignment> {
        if self.precompute_distances {
            self.fit_query(&DistanceMatrix::new(data))
        } else {
            self.fit_query(&LinearScan::new(data))
        }
    }

    /// Fit against an existing neighborhood query, e.g. a shared
    /// [`DistanceMatrix`] reused across several runs.
    pub fn fit_query<Q>(&mut self, query: &Q) -> Result<Assignment>
    where
        Q: NeighborhoodQuery + ?Sized,
    {
        self.validate()?;

        let expansion = expand(query, self.eps, self.min_samples);
        let scores = silhouette_samples(query, &expansion.labels);

        self.core_sample_indices = Some(expansion.core_indices());
        self.n_clusters = Some(expansion.n_clusters);
        self.scores = Some(scores);
        self.labels = Some(expansion.labels.clone());

        Ok(expansion.labels)
    }

    fn validate(&self) -> Result<()> {
        if self.eps.is_nan() {
            return Err(Error::invalid_parameter("eps", "must be a number"));
        }
        if self.eps < 0.0 {
            return Err(Error::invalid_parameter(
                "eps",
                format!("must be >= 0, got {}", self.eps),
            ));
        }
        Ok(())
    }

    pub fn get_n_clusters(&self) -> Option<usize> {
        self.n_clusters
    }

    pub fn get_n_noise_points(&self) -> Option<usize> {
        self.labels
            .as_ref()
            .map(|labels| labels.iter().filter(|&&label| label == NOISE).count())
    }

    pub fn is_core_sample(&self, sample_idx: usize) -> Option<bool> {
        self.core_sample_indices
            .as_ref()
            .map(|core_indices| core_indices.contains(&sample_idx))
    }

    /// Average silhouette of the last fit, noise counted in the denominator.
    pub fn silhouette_score(&self) -> Option<f64> {
        match (&self.scores, &self.labels) {
            (Some(scores), Some(labels)) => Some(silhouette_score(scores, labels)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Point;
    use ndarray::array;

    fn points(coords: &[(&str, f64, f64)]) -> Dataset {
        Dataset::from_points(coords.iter().map(|&(id, x, y)| Point::new(id, x, y)))
    }

    fn scenario() -> Dataset {
        points(&[("A", 0.0, 0.0), ("B", 0.0, 1.0), ("C", 0.0, 2.0), ("D", 10.0, 10.0)])
    }

    #[test]
    fn test_dbscan_scenario() {
        let data = scenario();
        let mut dbscan = DBSCAN::new(1.5, 2);
        let labels = dbscan.fit_predict(&data).unwrap();

        assert_eq!(labels, array![1, 1, 1, -1]);
        assert_eq!(dbscan.get_n_clusters(), Some(1));
        assert_eq!(dbscan.get_n_noise_points(), Some(1));
    }

    #[test]
    fn test_dbscan_basic() {
        let data = points(&[
            ("a", 1.0, 1.0),
            ("b", 1.2, 1.1),
            ("c", 1.1, 1.2),
            ("d", 8.0, 8.0),
            ("e", 8.1, 8.1),
            ("f", 8.2, 7.9),
            ("outlier", 15.0, 1.0),
        ]);

        let mut dbscan = DBSCAN::new(1.0, 2);
        let labels = dbscan.fit_predict(&data).unwrap();

        assert_eq!(labels, array![1, 1, 1, 2, 2, 2, -1]);
        assert_eq!(dbscan.get_n_clusters(), Some(2));
        assert!(!dbscan.core_sample_indices.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_dbscan_noise_detection() {
        let data = points(&[
            ("a", 0.0, 0.0),
            ("b", 10.0, 10.0),
            ("c", 20.0, 20.0),
            ("d", 30.0, 30.0),
        ]);

        let mut dbscan = DBSCAN::new(1.0, 2);
        dbscan.fit(&data).unwrap();

        assert_eq!(dbscan.get_n_noise_points(), Some(data.n_samples()));
        assert_eq!(dbscan.get_n_clusters(), Some(0));
        assert_eq!(dbscan.silhouette_score(), Some(0.0));
    }

    #[test]
    fn test_dbscan_single_cluster() {
        let data = points(&[
            ("a", 1.0, 1.0),
            ("b", 1.1, 1.0),
            ("c", 1.0, 1.1),
            ("d", 1.1, 1.1),
            ("e", 1.2, 1.0),
            ("f", 1.0, 1.2),
        ]);

        let mut dbscan = DBSCAN::new(0.5, 2);
        let labels = dbscan.fit_predict(&data).unwrap();

        assert_eq!(dbscan.get_n_clusters(), Some(1));
        assert!(labels.iter().all(|&label| label == 1));
        // No second cluster to compare against.
        assert!(dbscan.scores.as_ref().unwrap().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_noise_reclaimed_by_later_core_point() {
        let data = scenario();
        let colinear = points(&[("A", 0.0, 0.0), ("B", 1.0, 0.0), ("C", 2.0, 0.0)]);
        let expansion = expand(&LinearScan::new(&colinear), 1.5, 2);
        assert_eq!(expansion.labels, array![1, 1, 1]);
        assert_eq!(expansion.n_clusters, 1);

        // X is visited first and tagged noise, then reached from core point A.
        let data2 = points(&[("X", 0.0, 0.0), ("B", 2.0, 0.0), ("A", 1.0, 0.0), ("C", 3.0, 0.0)]);
        let expansion = expand(&LinearScan::new(&data2), 1.0, 3);
        assert_eq!(expansion.labels, array![1, 1, 1, 1]);
        assert_eq!(expansion.core, vec![false, true, true, false]);
        assert_eq!(expansion.n_noise(), 0);

        assert_eq!(expand(&LinearScan::new(&data), 1.5, 2).n_noise(), 1);
    }

    #[test]
    fn test_new_core_point_claims_shared_border_point() {
        let data = points(&[
            ("A", 0.0, 0.0),
            ("B", 1.0, 0.0),
            ("Q", 2.0, 0.0),
            ("B2", 1.0, 1.0),
            ("S", 3.0, 0.0),
            ("T1", 4.0, 0.0),
            ("T2", 3.0, 1.0),
        ]);

        let expansion = expand(&LinearScan::new(&data), 1.0, 4);
        assert_eq!(expansion.labels, array![1, 1, 2, 1, 2, 2, 2]);
        assert_eq!(expansion.n_clusters, 2);
        assert_eq!(expansion.core_indices(), vec![1, 4]);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let data = points(&[
            ("a", 0.0, 0.0),
            ("b", 0.3, 0.1),
            ("c", 0.7, 0.4),
            ("d", 5.0, 5.0),
            ("e", 5.4, 5.2),
            ("f", 9.0, 0.5),
        ]);

        let mut first = DBSCAN::new(0.6, 2);
        let mut second = DBSCAN::new(0.6, 2);
        assert_eq!(first.fit_predict(&data).unwrap(), second.fit_predict(&data).unwrap());
        assert_eq!(first.scores, second.scores);
    }

    #[test]
    fn test_precomputed_distances_match() {
        let data = scenario();
        let mut scan = DBSCAN::new(1.5, 2);
        let mut cached = DBSCAN::new(1.5, 2).precompute_distances(true);

        assert_eq!(scan.fit_predict(&data).unwrap(), cached.fit_predict(&data).unwrap());
        assert_eq!(scan.scores, cached.scores);
    }

    #[test]
    fn test_degenerate_geometry() {
        let same = points(&[("a", 1.0, 1.0), ("b", 1.0, 1.0), ("c", 1.0, 1.0)]);
        let mut dbscan = DBSCAN::new(0.0, 3);
        assert_eq!(dbscan.fit_predict(&same).unwrap(), array![1, 1, 1]);

        let mut too_many = DBSCAN::new(100.0, 10);
        assert_eq!(too_many.fit_predict(&same).unwrap(), array![-1, -1, -1]);
    }

    #[test]
    fn test_zero_min_samples_makes_every_point_core() {
        let data = scenario();
        let expansion = expand(&LinearScan::new(&data), 1.5, 0);
        assert_eq!(expansion.labels, array![1, 1, 1, 2]);
        assert!(expansion.core.iter().all(|&c| c));
    }

    #[test]
    fn test_empty_dataset_is_not_an_error() {
        let mut dbscan = DBSCAN::new(1.0, 2);
        let labels = dbscan.fit_predict(&Dataset::empty()).unwrap();

        assert!(labels.is_empty());
        assert_eq!(dbscan.get_n_clusters(), Some(0));
        assert_eq!(dbscan.get_n_noise_points(), Some(0));
    }

    #[test]
    fn test_dbscan_invalid_eps() {
        let data = scenario();
        assert!(matches!(
            DBSCAN::new(-1.0, 2).fit(&data),
            Err(Error::InvalidParameter { name: "eps", .. })
        ));
        assert!(DBSCAN::new(f64::NAN, 2).fit(&data).is_err());
    }

    #[test]
    fn test_dbscan_core_sample_check() {
        let data = points(&[
            ("a", 1.0, 1.0),
            ("b", 1.1, 1.0),
            ("c", 1.2, 1.0),
            ("isolated", 10.0, 10.0),
        ]);

        let mut dbscan = DBSCAN::new(0.5, 2);
        assert_eq!(dbscan.is_core_sample(0), None);
        dbscan.fit(&data).unwrap();

        assert_eq!(dbscan.is_core_sample(0), Some(true));
        assert_eq!(dbscan.is_core_sample(1), Some(true));
        assert_eq!(dbscan.is_core_sample(3), Some(false));
    }
}
