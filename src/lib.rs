//! Density-based clustering of labeled 2-D points with automatic estimation
//! of the DBSCAN neighborhood radius (`eps`) or minimum neighborhood size
//! (`min_samples`).
//!
//! ```rust
//! use dbscan_auto::{ClusteringConfig, Dataset, run};
//!
//! let data = Dataset::parse("A,0,0\nB,0,1\nC,0,2\nD,10,10\n").unwrap();
//! let config = ClusteringConfig::new().eps(1.5).min_samples(2);
//! let result = run(&data, &config).unwrap();
//!
//! assert_eq!(result.n_clusters, 1);
//! assert_eq!(result.n_noise, 1);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod cluster;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod neighbors;
pub mod pipeline;
pub mod report;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

/// Cluster tag per point: `0` unclassified, `-1` noise, `k >= 1` cluster `k`.
pub type Assignment = Array1<i32>;

pub use cluster::{
    DBSCAN, EpsEstimate, Expansion, MuCandidate, MuEstimate, NOISE, UNCLASSIFIED, estimate_eps,
    estimate_mu, expand, find_elbow, k_distance_curve, mu_candidates,
};
pub use config::{ClusteringConfig, Mode};
pub use dataset::{DIMENSION, Dataset, Point};
pub use error::{Error, Result};
pub use metrics::{silhouette_samples, silhouette_score};
pub use neighbors::{DistanceMatrix, LinearScan, NeighborhoodQuery, euclidean_distance};
pub use pipeline::{ClusteringResult, Estimate, run};
pub use report::ClusterReport;
