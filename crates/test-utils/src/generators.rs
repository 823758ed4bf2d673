//! Synthetic series generators.
//!
//! These generators create predictable, verifiable yearly series that
//! can be used across the test suite.

use mrds_common::SamplePoint;

/// Creates `count` consecutive yearly points on the line `y = slope * x + intercept`.
///
/// # Example
///
/// ```
/// use test_utils::linear_points;
///
/// let points = linear_points(2000, 3, 2.0, 1.0);
/// assert_eq!(points[0].x, 2000);
/// assert_eq!(points[2].y, 2.0 * 2002.0 + 1.0);
/// ```
pub fn linear_points(start_year: i64, count: usize, slope: f64, intercept: f64) -> Vec<SamplePoint> {
    (0..count as i64)
        .map(|i| {
            let x = start_year + i;
            SamplePoint::new(x, slope * x as f64 + intercept)
        })
        .collect()
}

/// Creates `count` yearly points starting at `start_value` and growing by
/// `step` per year.
///
/// Values are anchored at the first year rather than year zero, which keeps
/// them small for realistic index data (e.g. NDVI around 0.3).
pub fn stepped_points(start_year: i64, count: usize, start_value: f64, step: f64) -> Vec<SamplePoint> {
    (0..count)
        .map(|i| SamplePoint::new(start_year + i as i64, start_value + step * i as f64))
        .collect()
}

/// Creates a deterministic zig-zag series: alternating offsets of `±amplitude`
/// around a constant `level`. Useful for series with no overall trend.
pub fn zigzag_points(start_year: i64, count: usize, level: f64, amplitude: f64) -> Vec<SamplePoint> {
    (0..count)
        .map(|i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            SamplePoint::new(start_year + i as i64, level + sign * amplitude)
        })
        .collect()
}

/// Creates a solid RGB pixel buffer (3 bytes per pixel).
pub fn solid_rgb_pixels(width: usize, height: usize, rgb: [u8; 3]) -> Vec<u8> {
    rgb.iter()
        .copied()
        .cycle()
        .take(width * height * 3)
        .collect()
}
