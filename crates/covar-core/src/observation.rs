use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Variable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variable {
    X,
    Y,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
        }
    }
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// One (x, y) pair. `id` is the position in the input and only used for keying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
    pub id: usize,
}

impl Observation {
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { x, y, id }
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Ordered paired observations. Serializes as a bare array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset(Vec<Observation>);

impl Dataset {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Pair `xs[i]` with `ys[i]`. Callers guarantee equal lengths; extra
    /// values on the longer side are ignored.
    pub fn from_pairs(xs: &[f64], ys: &[f64]) -> Self {
        Self(
            xs.iter()
                .zip(ys)
                .enumerate()
                .map(|(id, (&x, &y))| Observation::new(id, x, y))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.0.iter()
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|o| o.x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|o| o.y)
    }

    /// First `limit` observations, for bounded previews.
    pub fn head(&self, limit: usize) -> &[Observation] {
        &self.0[..self.0.len().min(limit)]
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
