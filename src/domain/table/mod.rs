//! Generic tabular engine: sort, search, paginate.

pub mod column;
pub mod engine;
pub mod pagination;
pub mod search;
pub mod sort;
