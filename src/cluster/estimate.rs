//! Parameter estimation for DBSCAN.
//!
//! Exactly one parameter is estimated per run:
//!
//! - [`estimate_mu`] fixes `eps` and tries three `min_samples` candidates,
//!   `floor(ln n)`, `ceil(ln n)` and `2 * DIMENSION`, keeping the one with the
//!   best average silhouette. Each candidate gets a fresh assignment, so no
//!   state carries over between candidates.
//! - [`estimate_eps`] fixes `min_samples` and picks the elbow of the sorted
//!   k-distance curve: the point furthest from the chord joining the curve's
//!   endpoints.

use super::dbscan::expand;
use crate::dataset::{DIMENSION, Dataset};
use crate::error::{Error, Result};
use crate::metrics::{silhouette_samples, silhouette_score};
use crate::neighbors::{DistanceMatrix, NeighborhoodQuery};
use tracing::{debug, info};

/// One evaluated `min_samples` candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MuCandidate {
    pub min_samples: usize,
    pub n_clusters: usize,
    pub silhouette: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MuEstimate {
    pub min_samples: usize,
    pub silhouette: f64,
    /// Every candidate in evaluation order.
    pub candidates: Vec<MuCandidate>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpsEstimate {
    pub eps: f64,
    pub elbow_index: usize,
    /// k-distances sorted in descending order.
    pub curve: Vec<f64>,
}

/// `[floor(ln n), ceil(ln n), 2 * DIMENSION]` for a dataset of `n >= 1` points.
pub fn mu_candidates(n_samples: usize) -> [usize; 3] {
    let ln = (n_samples as f64).ln();
    [ln.floor() as usize, ln.ceil() as usize, 2 * DIMENSION]
}

pub fn estimate_mu(data: &Dataset, eps: f64) -> Result<MuEstimate> {
    if data.is_empty() {
        return Err(Error::EmptyDataset);
    }
    if eps.is_nan() || eps < 0.0 {
        return Err(Error::invalid_parameter(
            "eps",
            format!("must be >= 0, got {eps}"),
        ));
    }

    let distances = DistanceMatrix::new(data);
    let mut candidates = Vec::with_capacity(3);
    let mut best: Option<MuCandidate> = None;

    for min_samples in mu_candidates(data.n_samples()) {
        let expansion = expand(&distances, eps, min_samples);
        let samples = silhouette_samples(&distances, &expansion.labels);
        let candidate = MuCandidate {
            min_samples,
            n_clusters: expansion.n_clusters,
            silhouette: silhouette_score(&samples, &expansion.labels),
        };
        debug!(
            min_samples,
            eps,
            n_clusters = candidate.n_clusters,
            silhouette = candidate.silhouette,
            "evaluated min_samples candidate"
        );

        if best.is_none_or(|b| candidate.silhouette > b.silhouette) {
            best = Some(candidate);
        }
        candidates.push(candidate);
    }

    let best = best.ok_or(Error::EmptyDataset)?;
    info!(
        min_samples = best.min_samples,
        silhouette = best.silhouette,
        "estimated min_samples"
    );

    Ok(MuEstimate {
        min_samples: best.min_samples,
        silhouette: best.silhouette,
        candidates,
    })
}

/// Distance from every point to its `k`-th nearest other point, sorted in
/// descending order.
pub fn k_distance_curve<Q>(query: &Q, k: usize) -> Result<Vec<f64>>
where
    Q: NeighborhoodQuery + ?Sized,
{
    let n_samples = query.len();
    if k == 0 {
        return Err(Error::invalid_parameter("min_samples", "must be >= 1 to build a k-distance curve"));
    }
    if k >= n_samples {
        return Err(Error::invalid_parameter(
            "min_samples",
            format!("{k} exceeds the {} neighbors available per point", n_samples.saturating_sub(1)),
        ));
    }

    let mut curve = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let mut distances: Vec<f64> = (0..n_samples)
            .filter(|&j| j != i)
            .map(|j| query.distance(i, j))
            .collect();
        distances.sort_by(f64::total_cmp);
        curve.push(distances[k - 1]);
    }

    curve.sort_by(|a, b| b.total_cmp(a));
    Ok(curve)
}

/// Index of the curve point furthest from the straight line through its
/// first and last points. Ties go to the lowest index.
pub fn find_elbow(curve: &[f64]) -> Option<usize> {
    let last = curve.len().checked_sub(1)?;
    let (x0, y0) = (0.0, curve[0]);
    let (x1, y1) = (last as f64, curve[last]);
    let chord = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
    if chord == 0.0 {
        return Some(0);
    }

    let mut elbow = 0;
    let mut max_distance = f64::NEG_INFINITY;
    for (i, &y) in curve.iter().enumerate() {
        let x = i as f64;
        let distance = ((x - x0) * (y1 - y0) - (y - y0) * (x1 - x0)).abs() / chord;
        if distance > max_distance {
            max_distance = distance;
            elbow = i;
        }
    }

    Some(elbow)
}

pub fn estimate_eps(data: &Dataset, min_samples: usize) -> Result<EpsEstimate> {
    if data.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let distances = DistanceMatrix::new(data);
    let curve = k_distance_curve(&distances, min_samples)?;
    let elbow_index = find_elbow(&curve).ok_or(Error::EmptyDataset)?;
    let eps = curve[elbow_index];
    info!(min_samples, eps, elbow_index, "estimated eps");

    Ok(EpsEstimate {
        eps,
        elbow_index,
        curve,
    })
}
