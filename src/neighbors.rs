//! Neighborhood queries over a [`Dataset`].
//!
//! `region_query(idx, eps)` returns every point within `eps` of `idx`,
//! including `idx` itself, in stored order. [`LinearScan`] answers it with an
//! O(n) scan per call; [`DistanceMatrix`] precomputes all pairwise distances
//! once and answers the same queries from the cache. Both give identical
//! results.

use crate::dataset::Dataset;
use crate::{ArrayView1, Matrix};

pub fn euclidean_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Distance and radius lookups over an indexed point set.
pub trait NeighborhoodQuery {
    /// Number of points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distance between points `i` and `j`.
    fn distance(&self, i: usize, j: usize) -> f64;

    /// Indices of all points `q` with `distance(idx, q) <= eps`, `idx` included.
    fn region_query(&self, idx: usize, eps: f64) -> Vec<usize> {
        (0..self.len())
            .filter(|&q| self.distance(idx, q) <= eps)
            .collect()
    }
}

/// Recomputes distances from the coordinates on every call.
#[derive(Clone, Copy, Debug)]
pub struct LinearScan<'a> {
    data: &'a Dataset,
}

impl<'a> LinearScan<'a> {
    pub fn new(data: &'a Dataset) -> Self {
        Self { data }
    }
}

impl NeighborhoodQuery for LinearScan<'_> {
    fn len(&self) -> usize {
        self.data.n_samples()
    }

    fn distance(&self, i: usize, j: usize) -> f64 {
        self.data.distance(i, j)
    }
}

/// Symmetric `n x n` cache of pairwise distances.
#[derive(Clone, Debug)]
pub struct DistanceMatrix {
    distances: Matrix,
}

impl DistanceMatrix {
    pub fn new(data: &Dataset) -> Self {
        let n = data.n_samples();
        let mut distances = Matrix::zeros((n, n));

        for i in 0..n {
            for j in (i + 1)..n {
                let d = data.distance(i, j);
                distances[[i, j]] = d;
                distances[[j, i]] = d;
            }
        }

        Self { distances }
    }

    pub fn row(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.distances.row(idx)
    }
}

impl NeighborhoodQuery for DistanceMatrix {
    fn len(&self) -> usize {
        self.distances.nrows()
    }

    fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[[i, j]]
    }

    fn region_query(&self, idx: usize, eps: f64) -> Vec<usize> {
        self.row(idx)
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d <= eps)
            .map(|(q, _)| q)
            .collect()
    }
}
