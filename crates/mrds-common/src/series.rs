//! Yearly sample series keyed by site, buffer distance and metric.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One observation: integer year and metric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: i64,
    pub y: f64,
}

impl SamplePoint {
    pub fn new(x: i64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Identifies a series: (site, buffer distance, metric name).
///
/// Ordering is lexicographic over the three fields, which is also the
/// order groups are processed and reported in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub site: String,
    pub buffer: String,
    pub metric: String,
}

impl SeriesKey {
    pub fn new(site: impl Into<String>, buffer: impl Into<String>, metric: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            buffer: buffer.into(),
            metric: metric.into(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}m/{}", self.site, self.buffer, self.metric)
    }
}

/// Points for one key, sorted ascending by year.
///
/// Duplicate years are kept; the sort is stable so their input order
/// is preserved. A series is never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    key: SeriesKey,
    points: Vec<SamplePoint>,
}

impl Series {
    pub fn new(key: SeriesKey, mut points: Vec<SamplePoint>) -> Self {
        points.sort_by_key(|p| p.x);
        Self { key, points }
    }

    pub fn key(&self) -> &SeriesKey {
        &self.key
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SamplePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SamplePoint> {
        self.points.last()
    }

    /// Smallest and largest year. Because the points are sorted these are
    /// simply the first and last entries.
    pub fn x_range(&self) -> Option<(i64, i64)> {
        Some((self.first()?.x, self.last()?.x))
    }

    /// Smallest and largest value.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.points.iter().map(|p| p.y);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// True when a chart cannot be drawn: fewer than two points, or all
    /// years equal, or all values equal.
    pub fn is_degenerate(&self) -> bool {
        match (self.x_range(), self.y_range()) {
            (Some((x0, x1)), Some((y0, y1))) => self.len() < 2 || x0 == x1 || y0 == y1,
            _ => true,
        }
    }
}
