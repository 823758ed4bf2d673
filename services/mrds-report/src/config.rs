//! Report configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file,
//! then `MRDS_*` environment variables, then command-line flags.

use std::env;
use std::fs;
use std::path::Path;

use mrds_common::{default_metrics, parse_metric_list, MrdsError, MrdsResult};
use renderer::chart::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use renderer::{ChartOptions, ChartTheme};
use serde::{Deserialize, Serialize};
use trends::stats::DEFAULT_DIRECTION_EPS;
use trends::summary::DEFAULT_MIN_YEARS;
use trends::TrendConfig;

/// Chart canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Top-level report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Chart size
    pub canvas: CanvasConfig,

    /// Minimum sample count before slopes are reported
    pub min_years: usize,

    /// Slopes within this distance of zero are flat
    pub direction_eps: f64,

    /// Metric columns to process, in output order
    pub metrics: Vec<String>,

    /// Draw tick labels, title and trend caption
    pub labeled: bool,

    /// Process groups concurrently
    pub parallel: bool,

    /// Chart colours
    pub theme: ChartTheme,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            min_years: DEFAULT_MIN_YEARS,
            direction_eps: DEFAULT_DIRECTION_EPS,
            metrics: default_metrics(),
            labeled: true,
            parallel: false,
            theme: ChartTheme::default(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a YAML file. Missing keys keep their defaults.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> MrdsResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| MrdsError::InputReadError(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> MrdsResult<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Defaults, then the optional file, then the process environment.
    pub fn load(path: Option<&Path>) -> MrdsResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `MRDS_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> MrdsResult<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply `MRDS_*` overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> MrdsResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MRDS_MIN_YEARS") {
            self.min_years = parse_var("MRDS_MIN_YEARS", &v)?;
        }
        if let Some(v) = lookup("MRDS_DIRECTION_EPS") {
            self.direction_eps = parse_var("MRDS_DIRECTION_EPS", &v)?;
        }
        if let Some(v) = lookup("MRDS_METRICS") {
            self.metrics = parse_metric_list(&v);
        }
        if let Some(v) = lookup("MRDS_CANVAS_WIDTH") {
            self.canvas.width = parse_var("MRDS_CANVAS_WIDTH", &v)?;
        }
        if let Some(v) = lookup("MRDS_CANVAS_HEIGHT") {
            self.canvas.height = parse_var("MRDS_CANVAS_HEIGHT", &v)?;
        }
        if let Some(v) = lookup("MRDS_PARALLEL") {
            self.parallel = matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(())
    }

    /// Reject settings no run could succeed with.
    pub fn validate(&self) -> MrdsResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(invalid(
                "canvas",
                format!("dimensions must be positive, got {}x{}", self.canvas.width, self.canvas.height),
            ));
        }
        self.chart_options().validate()?;
        if self.direction_eps.is_nan() || self.direction_eps < 0.0 {
            return Err(invalid(
                "direction_eps",
                format!("must be a non-negative number, got {}", self.direction_eps),
            ));
        }
        if self.metrics.is_empty() {
            return Err(invalid("metrics", "at least one metric is required".to_string()));
        }
        Ok(())
    }

    pub fn trend_config(&self) -> TrendConfig {
        TrendConfig {
            min_years: self.min_years,
            direction_eps: self.direction_eps,
        }
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            width: self.canvas.width,
            height: self.canvas.height,
            labeled: self.labeled,
        }
    }
}

fn invalid(field: &str, message: String) -> MrdsError {
    MrdsError::InvalidConfig {
        field: field.to_string(),
        message,
    }
}

fn parse_var<T>(name: &str, value: &str) -> MrdsResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| invalid(name, format!("'{}': {}", value, e)))
}
