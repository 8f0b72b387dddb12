//! In-memory dataset store
//!
//! Built once, then only read. Every accessor preserves source order.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use crate::record::{Company, Location};
use crate::{Error, Result};
use super::source::{self, Table, TableRecord};

/// Immutable companies and locations tables
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    companies: Vec<Company>,
    locations: Vec<Location>,
}

impl DatasetStore {
    /// Load both tables from CSV files. Any failure here is fatal for serving.
    pub fn load(companies: &Path, locations: &Path) -> Result<Self> {
        let companies = load_table::<Company>(companies)?;
        let locations = load_table::<Location>(locations)?;
        let store = Self::from_records(companies, locations);
        tracing::info!(
            "Loaded {} companies and {} locations",
            store.companies.len(),
            store.locations.len()
        );
        Ok(store)
    }

    /// Parse both tables from arbitrary readers
    pub fn from_readers<C: Read, L: Read>(companies: C, locations: L) -> Result<Self> {
        Ok(Self::from_records(
            source::read_table(companies)?,
            source::read_table(locations)?,
        ))
    }

    pub fn from_records(companies: Vec<Company>, locations: Vec<Location>) -> Self {
        Self { companies, locations }
    }

    // ========== Full scans ==========

    pub fn all_companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn all_locations(&self) -> &[Location] {
        &self.locations
    }

    // ========== Exact key access ==========

    /// First company in load order with this id
    pub fn company(&self, company_id: i64) -> Option<&Company> {
        self.companies.iter().find(|c| c.company_id == company_id)
    }

    pub fn has_company(&self, company_id: i64) -> bool {
        self.company(company_id).is_some()
    }

    /// Locations owned by a company, in load order
    pub fn locations_of(&self, company_id: i64) -> impl Iterator<Item = &Location> {
        self.locations
            .iter()
            .filter(move |l| l.company_id == company_id)
    }

    // ========== Statistics ==========

    pub fn stats(&self) -> DatasetStats {
        let mut seen = HashSet::new();
        let duplicate_company_ids = self
            .companies
            .iter()
            .filter(|c| !seen.insert(c.company_id))
            .map(|c| c.company_id)
            .collect::<HashSet<_>>()
            .len();

        let orphan_locations = self
            .locations
            .iter()
            .filter(|l| !seen.contains(&l.company_id))
            .count();

        DatasetStats {
            companies: self.companies.len(),
            locations: self.locations.len(),
            orphan_locations,
            duplicate_company_ids,
        }
    }
}

fn load_table<T: TableRecord>(path: &Path) -> Result<Vec<T>> {
    let table = T::TABLE;
    let file = File::open(path).map_err(|e| load_error(table, path, e.to_string()))?;
    source::read_table(file).map_err(|e| match e {
        Error::Csv(inner) => load_error(table, path, inner.to_string()),
        Error::Io(inner) => load_error(table, path, inner.to_string()),
        other => other,
    })
}

fn load_error(table: Table, path: &Path, reason: String) -> Error {
    Error::Load {
        table,
        path: path.display().to_string(),
        reason,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DatasetStats {
    pub companies: usize,
    pub locations: usize,
    /// Locations whose company_id matches no company
    pub orphan_locations: usize,
    /// Distinct ids that appear on more than one company
    pub duplicate_company_ids: usize,
}

impl std::fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dataset Statistics:")?;
        writeln!(f, "  Companies: {}", self.companies)?;
        writeln!(f, "  Locations: {}", self.locations)?;
        writeln!(f, "  Orphan locations: {}", self.orphan_locations)?;
        writeln!(f, "  Duplicate company ids: {}", self.duplicate_company_ids)
    }
}
