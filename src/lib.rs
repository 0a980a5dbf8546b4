//! # Bikeway Stats
//!
//! Progress statistics for a network of mapped path segments, such as a
//! cycling-infrastructure tracker publishing one GeoJSON dataset per line.
//!
//! This library provides:
//! - Merging of several feature collections into one deduplicated set of segments
//! - Haversine length of each segment, rounded per leg to whole meters
//! - Per-status totals and percentage shares, with display helpers
//!
//! ## Features
//!
//! - **`parallel`** - Sum segment lengths with rayon
//! - **`cli`** - Build the `bikeway-stats` command-line tool
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use bikeway_stats::{get_stats, display_distance_in_km, display_optional_percent, FeatureCollection};
//!
//! let geojson = r#"{
//!     "type": "FeatureCollection",
//!     "features": [{
//!         "type": "Feature",
//!         "properties": { "id": "l1-a", "name": "Quai", "status": "done" },
//!         "geometry": { "type": "LineString", "coordinates": [[4.83, 45.75], [4.84, 45.76]] }
//!     }]
//! }"#;
//!
//! let collection = FeatureCollection::from_json(geojson).unwrap();
//! let stats = get_stats(&[collection]).unwrap();
//! println!(
//!     "{}: {} ({})",
//!     stats.done.label,
//!     display_distance_in_km(stats.done.distance as f64),
//!     display_optional_percent(stats.done.percent),
//! );
//! ```

use geo::{Coord, LineString};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Unified error handling
pub mod error;
pub use error::{Result, StatsError};

// Status taxonomy and aggregation buckets
pub mod status;
pub use status::{Bucket, Status};

// Merging and deduplication of input datasets
pub mod collector;
pub use collector::{get_all_uniq_line_strings, get_all_uniq_line_strings_excluding, EXCLUDED_ID};

// Haversine measurement
pub mod geodesic;
#[cfg(feature = "parallel")]
pub use geodesic::get_distance_parallel;
pub use geodesic::{get_distance, get_line_string_distance, haversine_distance, EARTH_RADIUS_METERS};

// Per-bucket aggregation
pub mod stats;
pub use stats::{get_stats, get_stats_with_config, CategoryStat, Stats, StatsConfig, ZeroTotalPolicy};

// Display formatting
pub mod display;
pub use display::{
    display_distance_in_km, display_optional_percent, display_percent, UNDEFINED_PERCENT,
};

// ============================================================================
// Core Types
// ============================================================================

/// A `[longitude, latitude]` position in degrees.
///
/// Decoded from a GeoJSON position array. Any extra value (altitude) is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl TryFrom<Vec<f64>> for Coordinate {
    type Error = String;

    fn try_from(values: Vec<f64>) -> std::result::Result<Self, Self::Error> {
        match values.as_slice() {
            [longitude, latitude, ..] => Ok(Coordinate::new(*longitude, *latitude)),
            _ => Err(format!(
                "position needs longitude and latitude, got {} value(s)",
                values.len()
            )),
        }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.longitude, c.latitude]
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(c: Coordinate) -> Self {
        Coord {
            x: c.longitude,
            y: c.latitude,
        }
    }
}

/// Geometry of a mapped feature.
///
/// Only LineStrings are measured; every other GeoJSON geometry is kept as
/// its type name so it can be filtered out.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    LineString { coordinates: Vec<Coordinate> },
    Other { kind: String },
}

impl Geometry {
    /// GeoJSON type name of the geometry.
    pub fn kind(&self) -> &str {
        match self {
            Geometry::LineString { .. } => "LineString",
            Geometry::Other { kind } => kind,
        }
    }

    pub fn is_line_string(&self) -> bool {
        matches!(self, Geometry::LineString { .. })
    }
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // GeoJSON allows `"geometry": null` for unlocated features
        let raw = match Option::<RawGeometry>::deserialize(deserializer)? {
            Some(raw) => raw,
            None => {
                return Ok(Geometry::Other {
                    kind: "null".to_string(),
                })
            }
        };

        if raw.kind != "LineString" {
            return Ok(Geometry::Other { kind: raw.kind });
        }

        let coordinates = if raw.coordinates.is_null() {
            Vec::new()
        } else {
            serde_json::from_value(raw.coordinates).map_err(serde::de::Error::custom)?
        };
        Ok(Geometry::LineString { coordinates })
    }
}

impl Serialize for Geometry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Geometry::LineString { coordinates } => {
                let mut state = serializer.serialize_struct("Geometry", 2)?;
                state.serialize_field("type", "LineString")?;
                state.serialize_field("coordinates", coordinates)?;
                state.end()
            }
            Geometry::Other { kind } => {
                let mut state = serializer.serialize_struct("Geometry", 1)?;
                state.serialize_field("type", kind)?;
                state.end()
            }
        }
    }
}

/// Properties of a mapped path segment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureProperties {
    /// Logical segment id, shared by copies of the segment across datasets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub status: Status,
    /// Line number of the network the segment belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Completion date, as published
    #[serde(rename = "doneAt", default, skip_serializing_if = "Option::is_none")]
    pub done_at: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single mapped path segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathFeature {
    #[serde(default)]
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

impl PathFeature {
    pub fn new(properties: FeatureProperties, geometry: Geometry) -> Self {
        Self {
            properties,
            geometry,
        }
    }

    /// Build a LineString feature from `(longitude, latitude)` pairs.
    ///
    /// # Example
    /// ```
    /// use bikeway_stats::{PathFeature, Status};
    /// let feature = PathFeature::line_string(Some("l2-b"), Status::Wip, &[(4.80, 45.70), (4.81, 45.70)]);
    /// assert!(feature.is_line_string());
    /// ```
    pub fn line_string(id: Option<&str>, status: Status, coordinates: &[(f64, f64)]) -> Self {
        Self {
            properties: FeatureProperties {
                id: id.map(str::to_string),
                status,
                ..FeatureProperties::default()
            },
            geometry: Geometry::LineString {
                coordinates: coordinates
                    .iter()
                    .map(|&(lon, lat)| Coordinate::new(lon, lat))
                    .collect(),
            },
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.properties.id.as_deref()
    }

    pub fn status(&self) -> Status {
        self.properties.status
    }

    pub fn is_line_string(&self) -> bool {
        self.geometry.is_line_string()
    }

    /// Geometry as a `geo` LineString, or `None` for other geometry kinds.
    pub fn to_line_string(&self) -> Option<LineString<f64>> {
        match &self.geometry {
            Geometry::LineString { coordinates } => Some(LineString::new(
                coordinates.iter().copied().map(Coord::from).collect(),
            )),
            Geometry::Other { .. } => None,
        }
    }
}

/// One input dataset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<PathFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<PathFeature>) -> Self {
        Self { features }
    }

    /// Decode a GeoJSON FeatureCollection.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Features whose geometry is a LineString, in dataset order.
    pub fn line_strings(&self) -> impl Iterator<Item = &PathFeature> + '_ {
        self.features.iter().filter(|f| f.is_line_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
