//! Variant analytics: performance rollup plus qualitative insights.

pub mod insight;
pub mod metrics;
pub mod service;
