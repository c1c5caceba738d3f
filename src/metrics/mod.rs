//! Optional counters for memo caches and acceleration runs (feature `metrics`).

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
