//! End-to-end run: resolve parameters, estimate the missing one, cluster once
//! more with the final parameters and collect the results.

use crate::cluster::{DBSCAN, NOISE, estimate_eps, estimate_mu};
use crate::config::{ClusteringConfig, Mode};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::{Assignment, Vector};
use tracing::info;

/// Parameter value chosen by an estimator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Estimate {
    MinSamples(usize),
    Eps(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClusteringResult {
    /// `None` only when `eps` had to be estimated on an empty dataset.
    pub eps: Option<f64>,
    /// `None` only when `min_samples` had to be estimated on an empty dataset.
    pub min_samples: Option<usize>,
    pub estimate: Option<Estimate>,
    pub labels: Assignment,
    pub scores: Vector,
    pub core_sample_indices: Vec<usize>,
    pub silhouette: f64,
    pub n_clusters: usize,
    pub n_noise: usize,
}

impl ClusteringResult {
    fn empty(eps: Option<f64>, min_samples: Option<usize>) -> Self {
        Self {
            eps,
            min_samples,
            estimate: None,
            labels: Assignment::zeros(0),
            scores: Vector::zeros(0),
            core_sample_indices: Vec::new(),
            silhouette: 0.0,
            n_clusters: 0,
            n_noise: 0,
        }
    }

    /// `(id, cluster, quality)` for every point in stored order.
    pub fn assignments<'a>(
        &'a self,
        data: &'a Dataset,
    ) -> impl Iterator<Item = (&'a str, i32, f64)> + 'a {
        data.ids()
            .iter()
            .zip(self.labels.iter().zip(self.scores.iter()))
            .map(|(id, (&label, &score))| (id.as_str(), label, score))
    }

    /// Indices of the members of `cluster`, in stored order.
    pub fn members(&self, cluster: i32) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == cluster)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn noise(&self) -> Vec<usize> {
        self.members(NOISE)
    }
}

pub fn run(data: &Dataset, config: &ClusteringConfig) -> Result<ClusteringResult> {
    let mode = config.mode()?;

    let (eps, min_samples, estimate) = match mode {
        Mode::Fixed { eps, min_samples } => (eps, min_samples, None),
        Mode::EstimateMu { eps } if data.is_empty() => {
            return Ok(ClusteringResult::empty(Some(eps), None));
        }
        Mode::EstimateEps { min_samples } if data.is_empty() => {
            return Ok(ClusteringResult::empty(None, Some(min_samples)));
        }
        Mode::EstimateMu { eps } => {
            let estimate = estimate_mu(data, eps)?;
            (eps, estimate.min_samples, Some(Estimate::MinSamples(estimate.min_samples)))
        }
        Mode::EstimateEps { min_samples } => {
            let estimate = estimate_eps(data, min_samples)?;
            (estimate.eps, min_samples, Some(Estimate::Eps(estimate.eps)))
        }
    };

    let mut dbscan = DBSCAN::new(eps, min_samples).precompute_distances(config.precompute_distances);
    let labels = dbscan.fit_predict(data)?;
    let silhouette = dbscan.silhouette_score().unwrap_or(0.0);
    let scores = dbscan.scores.take().unwrap_or_else(|| Vector::zeros(labels.len()));
    let n_clusters = dbscan.get_n_clusters().unwrap_or(0);
    let n_noise = dbscan.get_n_noise_points().unwrap_or(0);
    info!(eps, min_samples, n_clusters, n_noise, silhouette, "clustering complete");

    Ok(ClusteringResult {
        eps: Some(eps),
        min_samples: Some(min_samples),
        estimate,
        core_sample_indices: dbscan.core_sample_indices.take().unwrap_or_default(),
        labels,
        scores,
        silhouette,
        n_clusters,
        n_noise,
    })
}
