pub mod analytics;
pub mod common;
pub mod model;
pub mod ratelimit;
pub mod table;
pub mod variant;
