//! Great-circle length of path segments.
//!
//! Each leg (pair of consecutive positions) is measured with the haversine
//! formula on a sphere of radius [`EARTH_RADIUS_METERS`] and rounded to whole
//! meters. Segment lengths are sums of rounded legs, never a rounded sum.

use std::f64::consts::PI;

use geo::Coord;

use crate::error::{Result, StatsError};
use crate::PathFeature;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Radius of the Earth in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

fn to_radians(degrees: f64) -> f64 {
    // (deg * PI) / 180, not f64::to_radians: the last bit can flip a rounded leg
    degrees * PI / 180.0
}

/// Haversine distance in whole meters between two `(x = longitude, y = latitude)` positions.
///
/// # Example
/// ```
/// use bikeway_stats::haversine_distance;
/// use geo::Coord;
///
/// let a = Coord { x: 0.0, y: 0.0 };
/// let b = Coord { x: 0.0, y: 0.01 };
/// assert_eq!(haversine_distance(a, b), 1112);
/// ```
pub fn haversine_distance(start: Coord<f64>, end: Coord<f64>) -> u64 {
    let lat1 = to_radians(start.y);
    let lon1 = to_radians(start.x);
    let lat2 = to_radians(end.y);
    let lon2 = to_radians(end.x);

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for antipodal points
    let c = 2.0 * a.min(1.0).sqrt().asin();

    (EARTH_RADIUS_METERS * c).round() as u64
}

/// Length of a LineString feature in meters.
///
/// Segments with fewer than two positions measure 0.
///
/// # Errors
/// [`StatsError::InvalidGeometry`] if the feature is not a LineString.
pub fn get_line_string_distance(feature: &PathFeature) -> Result<u64> {
    let line = feature
        .to_line_string()
        .ok_or_else(|| StatsError::InvalidGeometry {
            feature_id: feature.properties.id.clone(),
            kind: feature.geometry.kind().to_string(),
        })?;

    Ok(line
        .lines()
        .map(|leg| haversine_distance(leg.start, leg.end))
        .sum())
}

/// Total length of `features` in meters.
///
/// Features are not filtered here: any non-LineString fails the whole sum.
pub fn get_distance<'a, I>(features: I) -> Result<u64>
where
    I: IntoIterator<Item = &'a PathFeature>,
{
    features.into_iter().map(get_line_string_distance).sum()
}

/// Total length of `features` in meters, measured in parallel.
///
/// Leg lengths are integers, so the result matches [`get_distance`] exactly.
#[cfg(feature = "parallel")]
pub fn get_distance_parallel(features: &[&PathFeature]) -> Result<u64> {
    features
        .par_iter()
        .map(|feature| get_line_string_distance(feature))
        .sum()
}
