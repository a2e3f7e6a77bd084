//! Silhouette scoring of a completed cluster assignment.

use crate::neighbors::NeighborhoodQuery;
use crate::{Assignment, Vector};

/// Per-point silhouette `(b - a) / max(a, b)` for every clustered point.
///
/// `a` is the mean distance to the other members of the point's cluster (0
/// for a singleton) and `b` the smallest mean distance to the members of any
/// other non-empty cluster. Noise and unclassified points score 0. When no
/// other cluster exists, or `a` and `b` are both 0, the score is 0.
///
/// `labels` must hold exactly one tag per point of `query`.
pub fn silhouette_samples<Q>(query: &Q, labels: &Assignment) -> Vector
where
    Q: NeighborhoodQuery + ?Sized,
{
    debug_assert_eq!(labels.len(), query.len(), "one label per point");
    let n_samples = labels.len();
    let n_clusters = labels.iter().copied().max().unwrap_or(0).max(0) as usize;
    let mut scores = Vector::zeros(n_samples);
    if n_clusters == 0 {
        return scores;
    }

    let mut sizes = vec![0usize; n_clusters + 1];
    for &label in labels.iter().filter(|&&label| label > 0) {
        sizes[label as usize] += 1;
    }

    let mut sums = vec![0.0; n_clusters + 1];
    for i in 0..n_samples {
        let own = labels[i];
        if own <= 0 {
            continue;
        }

        sums.iter_mut().for_each(|s| *s = 0.0);
        for j in 0..n_samples {
            let other = labels[j];
            if other > 0 && j != i {
                sums[other as usize] += query.distance(i, j);
            }
        }

        let own = own as usize;
        let a = if sizes[own] > 1 {
            sums[own] / (sizes[own] - 1) as f64
        } else {
            0.0
        };

        let b = (1..=n_clusters)
            .filter(|&k| k != own && sizes[k] > 0)
            .map(|k| sums[k] / sizes[k] as f64)
            .fold(None, |best: Option<f64>, mean| {
                Some(best.map_or(mean, |b| b.min(mean)))
            });

        scores[i] = match b {
            Some(b) => {
                let denom = a.max(b);
                if denom > 0.0 { (b - a) / denom } else { 0.0 }
            }
            None => 0.0,
        };
    }

    scores
}

/// Mean silhouette over the whole dataset.
///
/// Clustered points contribute their score; noise contributes nothing but is
/// still counted in the denominator.
pub fn silhouette_score(samples: &Vector, labels: &Assignment) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }

    let total: f64 = samples
        .iter()
        .zip(labels.iter())
        .filter(|&(_, &label)| label > 0)
        .fold(0.0, |acc, (&score, _)| acc + score);
    total / labels.len() as f64
}
