use crate::dataset::Dataset;
use crate::error::Result;
use crate::pipeline::{ClusteringResult, Estimate};
use std::fmt;
use std::path::Path;

/// Plain-text cluster listing: estimated parameter (if any), cluster and
/// noise counts, then one line per cluster with its member ids.
pub struct ClusterReport<'a> {
    data: &'a Dataset,
    result: &'a ClusteringResult,
}

impl<'a> ClusterReport<'a> {
    pub fn new(data: &'a Dataset, result: &'a ClusteringResult) -> Self {
        Self { data, result }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl fmt::Display for ClusterReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result.estimate {
            Some(Estimate::MinSamples(mu)) => writeln!(f, "Estimated MinPts : {mu}")?,
            Some(Estimate::Eps(eps)) => writeln!(f, "Estimated eps : {eps:?}")?,
            None => {}
        }

        writeln!(f, "Number of clusters : {}", self.result.n_clusters)?;
        writeln!(f, "Number of noise : {}", self.result.n_noise)?;

        for cluster in 1..=self.result.n_clusters {
            let ids: Vec<&str> = self
                .result
                .members(cluster as i32)
                .into_iter()
                .map(|idx| self.data.id(idx))
                .collect();
            writeln!(f, "Cluster #{cluster} => {}", ids.join(" "))?;
        }

        Ok(())
    }
}
