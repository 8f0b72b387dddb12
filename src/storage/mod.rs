//! Storage Layer - immutable in-memory tables
//!
//! Two tables are loaded once from CSV and never mutated afterwards:
//! - companies(company_id, name, address, latitude, longitude)
//! - locations(location_id, company_id, name, address, latitude, longitude)

pub mod source;
pub mod dataset;

pub use dataset::{DatasetStats, DatasetStore};
pub use source::Table;
