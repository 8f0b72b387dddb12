//! CSV table sources
//!
//! Each source is a header row plus data rows. Rows are deserialized by
//! column name, so column order does not matter and extra columns are
//! ignored. Any row that cannot be typed fails the whole table.

use std::io::Read;
use serde::de::DeserializeOwned;
use crate::record::{Company, Coordinate, Location};
use crate::{Error, Result};

/// Which source table a row or error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Companies,
    Locations,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Companies => "companies",
            Table::Locations => "locations",
        }
    }

    /// Columns that must be present in the header row
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Table::Companies => &["company_id", "name", "address", "latitude", "longitude"],
            Table::Locations => &[
                "location_id",
                "company_id",
                "name",
                "address",
                "latitude",
                "longitude",
            ],
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed row that can be read from a table source.
pub trait TableRecord: DeserializeOwned {
    const TABLE: Table;

    fn coordinate(&self) -> Coordinate;
}

impl TableRecord for Company {
    const TABLE: Table = Table::Companies;

    fn coordinate(&self) -> Coordinate {
        Company::coordinate(self)
    }
}

impl TableRecord for Location {
    const TABLE: Table = Table::Locations;

    fn coordinate(&self) -> Coordinate {
        Location::coordinate(self)
    }
}

/// Read every row of a table, in source order.
pub fn read_table<T: TableRecord, R: Read>(reader: R) -> Result<Vec<T>> {
    let table = T::TABLE;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for &column in table.required_columns() {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::MissingColumn { table, column });
        }
    }

    let mut rows = Vec::new();
    for (index, result) in rdr.deserialize::<T>().enumerate() {
        let row = index as u64 + 1;
        let record = result.map_err(|e| Error::InvalidRecord {
            table,
            row,
            reason: e.to_string(),
        })?;
        record
            .coordinate()
            .validate()
            .map_err(|reason| Error::InvalidRecord { table, row, reason })?;
        rows.push(record);
    }

    tracing::debug!("Read {} rows from {} source", rows.len(), table);
    Ok(rows)
}
