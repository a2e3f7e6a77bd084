use crate::error::{Error, Result};

/// Which DBSCAN parameters a run uses and which one, if any, it estimates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    Fixed { eps: f64, min_samples: usize },
    EstimateMu { eps: f64 },
    EstimateEps { min_samples: usize },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusteringConfig {
    pub eps: Option<f64>,
    pub min_samples: Option<usize>,
    pub precompute_distances: bool,
}

impl ClusteringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eps(mut self, eps: f64) -> Self {
        self.eps = Some(eps);
        self
    }

    pub fn min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = Some(min_samples);
        self
    }

    pub fn precompute_distances(mut self, precompute: bool) -> Self {
        self.precompute_distances = precompute;
        self
    }

    /// Build a config from positional parameters.
    ///
    /// A single value containing `.` is `eps` and `min_samples` is estimated;
    /// any other single value is `min_samples` and `eps` is estimated. Two
    /// values are `min_samples` followed by `eps`.
    pub fn from_positional<S: AsRef<str>>(params: &[S]) -> Result<Self> {
        match params {
            [single] => {
                let single = single.as_ref();
                if single.contains('.') {
                    Ok(Self::new().eps(parse_eps(single)?))
                } else {
                    Ok(Self::new().min_samples(parse_min_samples(single)?))
                }
            }
            [mu, eps] => Ok(Self::new()
                .min_samples(parse_min_samples(mu.as_ref())?)
                .eps(parse_eps(eps.as_ref())?)),
            _ => Err(Error::invalid_parameter(
                "params",
                format!("expected <eps/mu> or <mu> <eps>, got {} values", params.len()),
            )),
        }
    }

    pub fn mode(&self) -> Result<Mode> {
        match (self.eps, self.min_samples) {
            (Some(eps), Some(min_samples)) => Ok(Mode::Fixed { eps, min_samples }),
            (Some(eps), None) => Ok(Mode::EstimateMu { eps }),
            (None, Some(min_samples)) => Ok(Mode::EstimateEps { min_samples }),
            (None, None) => Err(Error::MissingParameters),
        }
    }
}

fn parse_eps(raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::invalid_parameter("eps", format!("'{raw}' is not a number")))
}

fn parse_min_samples(raw: &str) -> Result<usize> {
    raw.trim().parse().map_err(|_| {
        Error::invalid_parameter("min_samples", format!("'{raw}' is not a non-negative integer"))
    })
}
