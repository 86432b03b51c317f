//! Scatter plot geometry: padded axis domains and a character-grid renderer
//! for terminals without a widget toolkit.

use crate::observation::Dataset;

/// Fraction of the data range added on each side of an axis.
const PADDING_RATIO: f64 = 0.1;

/// Closed interval `[min, max]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    /// Pad `[lo, hi]` by 10% of its width on both sides; a zero-width range
    /// is padded by 1 instead.
    fn padded(lo: f64, hi: f64) -> Self {
        let range = hi - lo;
        let pad = if range > 0.0 {
            range * PADDING_RATIO
        } else {
            1.0
        };
        Self {
            min: lo - pad,
            max: hi + pad,
        }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Map `v` onto `0..cells`, clamped to the last cell.
    fn cell(&self, v: f64, cells: usize) -> usize {
        let t = (v - self.min) / self.width();
        let idx = (t * cells as f64).floor();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(cells - 1)
        }
    }
}

/// Axis domains enclosing every observation with some breathing room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub x: Domain,
    pub y: Domain,
}

impl PlotBounds {
    /// `None` when there is nothing to plot.
    pub fn from_dataset(data: &Dataset) -> Option<Self> {
        let (min_x, max_x) = min_max(data.xs())?;
        let (min_y, max_y) = min_max(data.ys())?;
        Some(Self {
            x: Domain::padded(min_x, max_x),
            y: Domain::padded(min_y, max_y),
        })
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// ---------------------------------------------------------------------------
// Character grid
// ---------------------------------------------------------------------------

const POINT: char = '●';
const EMPTY: char = ' ';

/// Render `data` as a `width` x `height` grid of characters, top row first.
/// Returns an empty vector for an empty dataset or a zero-sized grid.
pub fn scatter_rows(data: &Dataset, width: usize, height: usize) -> Vec<String> {
    let Some(bounds) = PlotBounds::from_dataset(data) else {
        return Vec::new();
    };
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut grid = vec![vec![EMPTY; width]; height];
    for obs in data {
        let col = bounds.x.cell(obs.x, width);
        let row = height - 1 - bounds.y.cell(obs.y, height);
        grid[row][col] = POINT;
    }

    grid.into_iter().map(|r| r.into_iter().collect()).collect()
}
