//! Summary statistics and least-squares regression.
//!
//! Every function here is total: empty or degenerate input yields `0.0` or
//! `None`, never NaN or infinity.

use serde::{Deserialize, Serialize};

/// A sample for regression, e.g. `(sqft, price)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Median of the values; the mean of the two central values for even
/// lengths and `0.0` for empty input.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Arithmetic mean, `0.0` for empty input
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Ordinary least-squares fit, evaluated at the smallest and largest x.
///
/// Returns `None` for fewer than two points and when every x is identical,
/// since the slope is undefined in both cases.
pub fn linear_regression(points: &[DataPoint]) -> Option<[DataPoint; 2]> {
    let (slope, intercept) = least_squares(points)?;

    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);

    Some([
        DataPoint::new(min_x, intercept + slope * min_x),
        DataPoint::new(max_x, intercept + slope * max_x),
    ])
}

/// Slope of the line through two regression endpoints
pub fn slope(line: &[DataPoint; 2]) -> Option<f64> {
    let [a, b] = line;
    let dx = b.x - a.x;
    if dx == 0.0 {
        return None;
    }
    Some((b.y - a.y) / dx).filter(|s| s.is_finite())
}

/// `(slope, intercept)` of the least-squares line
fn least_squares(points: &[DataPoint]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    // Centered sums keep identical x values at exactly zero variance
    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), p| {
        let dx = p.x - mean_x;
        (sxx + dx * dx, sxy + dx * (p.y - mean_y))
    });

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    if slope.is_finite() && intercept.is_finite() {
        Some((slope, intercept))
    } else {
        None
    }
}
