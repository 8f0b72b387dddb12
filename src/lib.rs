//! # Geodir - company and location directory
//!
//! Read-only query service over two related tables loaded once at startup.
//!
//! Geodir provides:
//! - Typed records for companies and their locations
//! - An immutable in-memory dataset store loaded from CSV
//! - A filter engine (name substring, geodesic radius, exact id, company join)
//! - An axum HTTP adapter and a CLI over the same engine

pub mod record;
pub mod storage;
pub mod query;
pub mod server;
pub mod output;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use record::{Company, Coordinate, Location};
pub use storage::{DatasetStats, DatasetStore, Table};
pub use query::{CompanyFilter, CompanyQuery, FilterEngine, LocationsPolicy};

/// Result type alias for Geodir operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Geodir operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to load {table} from {path}: {reason}")]
    Load {
        table: Table,
        path: String,
        reason: String,
    },

    #[error("{table} source is missing column '{column}'")]
    MissingColumn { table: Table, column: &'static str },

    #[error("{table} row {row}: {reason}")]
    InvalidRecord { table: Table, row: u64, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Company not found: {0}")]
    CompanyNotFound(i64),

    #[error("No locations found for company: {0}")]
    LocationsNotFound(i64),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl Error {
    /// Per-request lookup misses; the store stays valid.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::CompanyNotFound(_) | Error::LocationsNotFound(_))
    }

    /// The caller asked something that cannot be answered as posed.
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Error::InvalidQuery(_))
    }

    /// The dataset could not be loaded, so nothing can be served.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Error::Load { .. }
                | Error::MissingColumn { .. }
                | Error::InvalidRecord { .. }
                | Error::Csv(_)
                | Error::Io(_)
        )
    }
}
