pub mod engine;
pub mod distance;

pub use engine::{CompanyFilter, CompanyQuery, FilterEngine, LocationsPolicy, DEFAULT_RADIUS_KM};
pub use distance::geodesic_km;
