//! Slope estimators and direction classification.

use mrds_common::SamplePoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default threshold below which a slope counts as flat.
pub const DEFAULT_DIRECTION_EPS: f64 = 1e-4;

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`.
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares fit using centered sums.
///
/// Returns `None` for fewer than two points or when every x is equal.
pub fn ols_fit(points: &[SamplePoint]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let x_bar = points.iter().map(|p| p.x as f64).sum::<f64>() / n;
    let y_bar = points.iter().map(|p| p.y).sum::<f64>() / n;

    let den: f64 = points.iter().map(|p| (p.x as f64 - x_bar).powi(2)).sum();
    if den == 0.0 {
        return None;
    }
    let num: f64 = points
        .iter()
        .map(|p| (p.x as f64 - x_bar) * (p.y - y_bar))
        .sum();

    let slope = num / den;
    Some(LinearFit {
        slope,
        intercept: y_bar - slope * x_bar,
    })
}

/// Theil-Sen slope: median of the slopes of every point pair with distinct x.
///
/// O(n²) in the number of points, which is fine for annual series.
/// Returns `None` when no such pair exists.
pub fn theil_sen_slope(points: &[SamplePoint]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }
    let mut slopes = Vec::with_capacity(points.len() * (points.len() - 1) / 2);
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            // widened so extreme years cannot overflow
            let dx = i128::from(b.x) - i128::from(a.x);
            if dx != 0 {
                slopes.push((b.y - a.y) / dx as f64);
            }
        }
    }
    median(&mut slopes)
}

/// Median of a slice, averaging the two middle values for even lengths.
fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

/// Direction of a trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increasing,
    Decreasing,
    Flat,
    InsufficientData,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Increasing => "increasing",
            Direction::Decreasing => "decreasing",
            Direction::Flat => "flat",
            Direction::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a slope: above `eps` increasing, below `-eps` decreasing,
/// otherwise flat. A missing slope means insufficient data.
pub fn classify_direction(slope: Option<f64>, eps: f64) -> Direction {
    match slope {
        None => Direction::InsufficientData,
        Some(s) if s > eps => Direction::Increasing,
        Some(s) if s < -eps => Direction::Decreasing,
        Some(_) => Direction::Flat,
    }
}
