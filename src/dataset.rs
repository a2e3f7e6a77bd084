use crate::error::{Error, Result};
use crate::neighbors::euclidean_distance;
use crate::{ArrayView1, Matrix};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Number of coordinates per point.
pub const DIMENSION: usize = 2;

/// A labeled 2-D point as supplied by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self { id: id.into(), x, y }
    }
}

/// Ordered point store. Points are identified by index; ids are labels only
/// and may repeat.
#[derive(Clone, Debug)]
pub struct Dataset {
    ids: Vec<String>,
    features: Matrix,
}

impl Dataset {
    pub fn new(ids: Vec<String>, features: Matrix) -> Result<Self> {
        if features.ncols() != DIMENSION {
            return Err(Error::DimensionMismatch {
                expected: DIMENSION,
                found: features.ncols(),
            });
        }
        if features.nrows() != ids.len() {
            return Err(Error::DimensionMismatch {
                expected: ids.len(),
                found: features.nrows(),
            });
        }

        Ok(Self { ids, features })
    }

    pub fn empty() -> Self {
        Self {
            ids: Vec::new(),
            features: Matrix::zeros((0, DIMENSION)),
        }
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut ids = Vec::new();
        let mut coords = Vec::new();
        for point in points {
            ids.push(point.id);
            coords.push(point.x);
            coords.push(point.y);
        }

        let n = ids.len();
        let features = Matrix::from_shape_vec((n, DIMENSION), coords)
            .unwrap_or_else(|_| Matrix::zeros((0, DIMENSION)));
        Self { ids, features }
    }

    /// Parse `id,x,y` records, one per line. Blank lines are skipped and
    /// fields past the third are ignored.
    pub fn parse(input: &str) -> Result<Self> {
        Self::from_reader(input.as_bytes())
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut points = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            points.push(parse_record(idx + 1, &line)?);
        }

        Ok(Self::from_points(points))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.n_samples() == 0
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn id(&self, idx: usize) -> &str {
        &self.ids[idx]
    }

    pub fn features(&self) -> &Matrix {
        &self.features
    }

    pub fn point(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.features.row(idx)
    }

    pub fn distance(&self, i: usize, j: usize) -> f64 {
        euclidean_distance(&self.point(i), &self.point(j))
    }
}

fn parse_record(line_no: usize, line: &str) -> Result<Point> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return Err(Error::malformed(
            line_no,
            format!("expected 3 fields (id,x,y), found {}", fields.len()),
        ));
    }

    let x = parse_coordinate(line_no, "x", fields[1])?;
    let y = parse_coordinate(line_no, "y", fields[2])?;
    Ok(Point::new(fields[0], x, y))
}

fn parse_coordinate(line_no: usize, axis: &str, raw: &str) -> Result<f64> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| Error::malformed(line_no, format!("{axis} coordinate '{raw}' is not a number")))?;
    if !value.is_finite() {
        return Err(Error::malformed(
            line_no,
            format!("{axis} coordinate '{raw}' is not finite"),
        ));
    }
    Ok(value)
}
