//! Batch report tool for MRDS yearly metric exports.
//!
//! This module exposes the internal modules for testing purposes.

pub mod config;
pub mod io;
pub mod pipeline;

pub use config::{CanvasConfig, ReportConfig};
pub use pipeline::{run_plot, run_trends, GroupOutcome, ManifestEntry, PlotReport, TrendsReport};
