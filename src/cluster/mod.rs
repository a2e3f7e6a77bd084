//! Density-based clustering and its parameter estimators.
//!
//! - [`expand`] / [`DBSCAN`]: one DBSCAN pass producing a fresh assignment
//!   (`-1` noise, `1..` cluster ids in discovery order).
//! - [`estimate_mu`]: silhouette-guided choice of `min_samples` for a fixed `eps`.
//! - [`estimate_eps`]: k-distance elbow choice of `eps` for a fixed `min_samples`.
//!
//! # Examples
//!
//! ## DBSCAN Clustering
//! ```rust
//! use dbscan_auto::{DBSCAN, Dataset};
//!
//! let data = Dataset::parse("a,1.0,1.0\nb,1.2,1.1\nc,1.1,1.2\nd,8.0,8.0\ne,8.1,8.1\nf,8.2,7.9\nout,15.0,1.0\n").unwrap();
//!
//! let mut dbscan = DBSCAN::new(1.0, 2); // eps=1.0, min_samples=2
//! let labels = dbscan.fit_predict(&data).unwrap();
//!
//! assert_eq!(dbscan.get_n_clusters(), Some(2));
//! assert_eq!(dbscan.get_n_noise_points(), Some(1));
//! assert_eq!(labels[6], -1);
//! ```
//!
//! ## Estimating eps
//! ```rust
//! use dbscan_auto::{Dataset, estimate_eps};
//!
//! let data = Dataset::parse("A,0,0\nB,0,1\nC,0,2\nD,10,10\n").unwrap();
//! let estimate = estimate_eps(&data, 1).unwrap();
//! assert_eq!(estimate.eps, 1.0);
//! ```

mod dbscan;
mod estimate;

pub use dbscan::{DBSCAN, Expansion, NOISE, UNCLASSIFIED, expand};
pub use estimate::{
    EpsEstimate, MuCandidate, MuEstimate, estimate_eps, estimate_mu, find_elbow, k_distance_curve,
    mu_candidates,
};
