//! View-model core for the link dashboard.
//!
//! Everything here is backend-agnostic: callers decode their wire payloads
//! into the `domain::model` types, then hand them to the table engine, the
//! analytics services, and the rate-limit panel builder. The `scheduler`
//! module keeps those snapshots fresh on a fixed poll cadence.

pub mod domain;
pub mod errors;
pub mod scheduler;

pub use domain::common::record::Record;
pub use domain::table::engine::{TableState, TableView};
pub use errors::{DashboardError, Result};
