//! Distances between coordinates, in kilometers
//!
//! `geodesic_km` solves the inverse geodesic problem on the WGS-84 ellipsoid
//! with Karney's method, which converges for every pair of points including
//! antipodal ones.

use std::sync::LazyLock;
use geographiclib_rs::{Geodesic, InverseGeodesic};
use crate::record::Coordinate;

static WGS84: LazyLock<Geodesic> = LazyLock::new(Geodesic::wgs84);

/// Ellipsoidal distance between two points in kilometers.
pub fn geodesic_km(from: Coordinate, to: Coordinate) -> f64 {
    let meters: f64 = WGS84.inverse(from.latitude, from.longitude, to.latitude, to.longitude);
    meters / 1000.0
}
