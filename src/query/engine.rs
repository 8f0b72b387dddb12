//! Filter engine implementation
//!
//! Provides the read-only query operations over a [`DatasetStore`]:
//! - Company listing with exactly one filter mode (name, radius, or none)
//! - Company lookup by id
//! - Location lookup by owning company id
//!
//! Every result preserves load order. Filters select, they never sort.

use serde::Deserialize;
use crate::record::{Company, Coordinate, Location};
use crate::storage::DatasetStore;
use crate::{Error, Result};
use super::distance::geodesic_km;

/// Radius used when a center is given without one
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Raw company query, as it arrives from a caller
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompanyQuery {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
}

impl CompanyQuery {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn within(center: Coordinate, radius_km: Option<f64>) -> Self {
        Self {
            latitude: Some(center.latitude),
            longitude: Some(center.longitude),
            radius: radius_km,
            ..Self::default()
        }
    }

    /// Resolve which filter mode applies. The first applicable wins:
    /// a non-empty name, then a complete center, then nothing.
    ///
    /// A center outside latitude [-90, 90] or longitude [-180, 180] is an
    /// [`Error::InvalidQuery`].
    pub fn filter(&self, default_radius_km: f64) -> Result<CompanyFilter> {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return Ok(CompanyFilter::Name(name.to_string()));
        }

        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                let center = Coordinate::new(latitude, longitude);
                center
                    .validate()
                    .map_err(|reason| Error::InvalidQuery(format!("center {reason}")))?;
                Ok(CompanyFilter::Radius {
                    center,
                    radius_km: self.radius.unwrap_or(default_radius_km),
                })
            }
            _ => Ok(CompanyFilter::All),
        }
    }
}

/// The single filter mode applied to the companies table
#[derive(Debug, Clone, PartialEq)]
pub enum CompanyFilter {
    /// Case-insensitive substring of the company name
    Name(String),
    /// Geodesic distance from `center` at most `radius_km`
    Radius { center: Coordinate, radius_km: f64 },
    All,
}

impl CompanyFilter {
    /// Whether a company passes this filter
    pub fn matches(&self, company: &Company) -> bool {
        match self {
            CompanyFilter::Name(needle) => company
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            CompanyFilter::Radius { center, radius_km } => {
                geodesic_km(company.coordinate(), *center) <= *radius_km
            }
            CompanyFilter::All => true,
        }
    }
}

impl std::fmt::Display for CompanyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompanyFilter::Name(name) => write!(f, "name contains '{}'", name),
            CompanyFilter::Radius { center, radius_km } => {
                write!(f, "within {} km of {}", radius_km, center)
            }
            CompanyFilter::All => write!(f, "all"),
        }
    }
}

/// How an empty location lookup is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationsPolicy {
    /// No locations is NotFound, whether or not the company exists
    #[default]
    EmptyIsNotFound,
    /// Unknown company is NotFound; a known company may have zero locations
    DistinguishMissingCompany,
}

/// Filter engine over a loaded dataset
pub struct FilterEngine<'a> {
    store: &'a DatasetStore,
    default_radius_km: f64,
    locations_policy: LocationsPolicy,
}

impl<'a> FilterEngine<'a> {
    /// Create a new filter engine with default settings
    pub fn new(store: &'a DatasetStore) -> Self {
        Self {
            store,
            default_radius_km: DEFAULT_RADIUS_KM,
            locations_policy: LocationsPolicy::default(),
        }
    }

    pub fn with_default_radius(mut self, radius_km: f64) -> Self {
        self.default_radius_km = radius_km;
        self
    }

    pub fn with_locations_policy(mut self, policy: LocationsPolicy) -> Self {
        self.locations_policy = policy;
        self
    }

    /// List companies matching a query. Zero matches is an empty result, not an error.
    pub fn find_companies(&self, query: &CompanyQuery) -> Result<Vec<&'a Company>> {
        let filter = query.filter(self.default_radius_km)?;
        tracing::debug!("Filtering companies: {}", filter);
        Ok(self.apply(&filter))
    }

    /// Scan the companies table with an already resolved filter
    pub fn apply(&self, filter: &CompanyFilter) -> Vec<&'a Company> {
        self.store
            .all_companies()
            .iter()
            .filter(|c| filter.matches(c))
            .collect()
    }

    /// Exact id lookup. Duplicated ids resolve to the first in load order.
    pub fn find_company_by_id(&self, company_id: i64) -> Result<&'a Company> {
        self.store
            .company(company_id)
            .ok_or(Error::CompanyNotFound(company_id))
    }

    /// All locations of a company, in load order
    pub fn find_locations_by_company_id(&self, company_id: i64) -> Result<Vec<&'a Location>> {
        let locations: Vec<_> = self.store.locations_of(company_id).collect();
        if !locations.is_empty() {
            return Ok(locations);
        }

        match self.locations_policy {
            LocationsPolicy::EmptyIsNotFound => Err(Error::LocationsNotFound(company_id)),
            LocationsPolicy::DistinguishMissingCompany => {
                if self.store.has_company(company_id) {
                    Ok(locations)
                } else {
                    Err(Error::CompanyNotFound(company_id))
                }
            }
        }
    }
}
