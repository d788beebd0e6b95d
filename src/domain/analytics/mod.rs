//! Derived-analytics aggregation pipeline.

pub mod bucket;
pub mod pipeline;
pub mod service;
