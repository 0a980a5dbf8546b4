//! Per-bucket progress statistics.
//!
//! The deduplicated segments are split into the four [`Bucket`]s, each bucket
//! is measured, and each total is expressed as a rounded share of the whole
//! network.
//!
//! ## Example
//! ```rust
//! use bikeway_stats::{get_stats, FeatureCollection, PathFeature, Status};
//!
//! let collection = FeatureCollection::new(vec![
//!     PathFeature::line_string(Some("a"), Status::Done, &[(0.0, 0.0), (0.0, 0.03)]),
//!     PathFeature::line_string(Some("b"), Status::Planned, &[(0.0, 0.0), (0.0, 0.01)]),
//! ]);
//!
//! let stats = get_stats(&[collection]).unwrap();
//! assert_eq!(stats.done.percent, Some(75));
//! assert_eq!(stats.planned.percent, Some(25));
//! ```

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::collector::{get_all_uniq_line_strings_excluding, EXCLUDED_ID};
use crate::error::Result;
use crate::status::Bucket;
use crate::{FeatureCollection, PathFeature};

/// What to report as a bucket's share when the network measures 0 m.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroTotalPolicy {
    /// Every bucket reports 0%
    #[default]
    Zero,
    /// Every bucket reports no percentage at all
    Undefined,
}

/// Tunable parts of the aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Segment ids never counted, wherever they appear
    pub excluded_ids: Vec<String>,
    pub zero_total: ZeroTotalPolicy,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            excluded_ids: vec![EXCLUDED_ID.to_string()],
            zero_total: ZeroTotalPolicy::Zero,
        }
    }
}

/// Aggregate for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    #[serde(rename = "name")]
    pub label: &'static str,
    /// Meters
    pub distance: u64,
    /// Share of the total, 0-100
    pub percent: Option<u32>,
    /// Style class for the presentation layer
    pub class: &'static str,
}

/// Statistics for the whole network, keyed by bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub done: CategoryStat,
    pub wip: CategoryStat,
    pub planned: CategoryStat,
    pub postponed: CategoryStat,
    #[serde(skip)]
    total_distance: u64,
}

impl Stats {
    pub fn get(&self, bucket: Bucket) -> &CategoryStat {
        match bucket {
            Bucket::Done => &self.done,
            Bucket::Wip => &self.wip,
            Bucket::Planned => &self.planned,
            Bucket::Postponed => &self.postponed,
        }
    }

    /// Buckets with their stats, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &CategoryStat)> + '_ {
        Bucket::ALL.into_iter().map(move |bucket| (bucket, self.get(bucket)))
    }

    /// Length of the whole deduplicated network in meters.
    pub fn total_distance(&self) -> u64 {
        self.total_distance
    }
}

/// Compute progress statistics with the default [`StatsConfig`].
pub fn get_stats(collections: &[FeatureCollection]) -> Result<Stats> {
    get_stats_with_config(collections, &StatsConfig::default())
}

/// Compute progress statistics for the merged `collections`.
///
/// Percentages are rounded independently and may not add up to exactly 100.
pub fn get_stats_with_config(
    collections: &[FeatureCollection],
    config: &StatsConfig,
) -> Result<Stats> {
    let features = get_all_uniq_line_strings_excluding(collections, config.excluded_ids.as_slice());

    let mut buckets: [Vec<&PathFeature>; 4] = Default::default();
    for &feature in &features {
        buckets[feature.status().bucket().index()].push(feature);
    }

    let total_distance = measure(&features)?;
    let mut distances = [0u64; 4];
    for (distance, members) in distances.iter_mut().zip(&buckets) {
        *distance = measure(members)?;
    }

    if total_distance == 0 {
        warn!(
            "[Stats] No measurable segment among {} features, percentages are {:?}",
            features.len(),
            config.zero_total
        );
    }

    let stat = |bucket: Bucket| {
        let distance = distances[bucket.index()];
        CategoryStat {
            label: bucket.label(),
            distance,
            percent: percent_of(distance, total_distance, config.zero_total),
            class: bucket.class(),
        }
    };

    let stats = Stats {
        done: stat(Bucket::Done),
        wip: stat(Bucket::Wip),
        planned: stat(Bucket::Planned),
        postponed: stat(Bucket::Postponed),
        total_distance,
    };

    info!(
        "[Stats] {} segments, {}m total: done={}m wip={}m planned={}m postponed={}m",
        features.len(),
        total_distance,
        stats.done.distance,
        stats.wip.distance,
        stats.planned.distance,
        stats.postponed.distance
    );

    Ok(stats)
}

#[cfg(feature = "parallel")]
fn measure(features: &[&PathFeature]) -> Result<u64> {
    crate::geodesic::get_distance_parallel(features)
}

#[cfg(not(feature = "parallel"))]
fn measure(features: &[&PathFeature]) -> Result<u64> {
    crate::geodesic::get_distance(features.iter().copied())
}

/// Share of `distance` in `total`, rounded to the nearest whole percent.
fn percent_of(distance: u64, total: u64, zero_total: ZeroTotalPolicy) -> Option<u32> {
    if total == 0 {
        return match zero_total {
            ZeroTotalPolicy::Zero => Some(0),
            ZeroTotalPolicy::Undefined => None,
        };
    }
    Some((distance as f64 / total as f64 * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FeatureProperties, Geometry, Status};

    fn segment(id: &str, status: Status, lat_span: f64) -> PathFeature {
        PathFeature::line_string(Some(id), status, &[(0.0, 0.0), (0.0, lat_span)])
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(1, 3, ZeroTotalPolicy::Zero), Some(33));
        assert_eq!(percent_of(2, 3, ZeroTotalPolicy::Zero), Some(67));
        assert_eq!(percent_of(1, 2, ZeroTotalPolicy::Zero), Some(50));
        assert_eq!(percent_of(1, 200, ZeroTotalPolicy::Zero), Some(1));
        assert_eq!(percent_of(5, 5, ZeroTotalPolicy::Undefined), Some(100));
        assert_eq!(percent_of(0, 0, ZeroTotalPolicy::Zero), Some(0));
        assert_eq!(percent_of(0, 0, ZeroTotalPolicy::Undefined), None);
    }

    #[test]
    fn test_bucket_partition() {
        let collection = FeatureCollection::new(vec![
            segment("done", Status::Done, 0.01),
            segment("wip", Status::Wip, 0.01),
            segment("planned", Status::Planned, 0.01),
            segment("unknown", Status::Unknown, 0.01),
            segment("variant", Status::Variant, 0.01),
            segment("postponed", Status::Postponed, 0.01),
            segment("variant-postponed", Status::VariantPostponed, 0.01),
        ]);

        let stats = get_stats(&[collection]).unwrap();
        assert_eq!(stats.total_distance(), 7 * 1112);
        assert_eq!(stats.done.distance, 1112);
        assert_eq!(stats.wip.distance, 1112);
        assert_eq!(stats.planned.distance, 3 * 1112);
        assert_eq!(stats.postponed.distance, 2 * 1112);

        let sum: u64 = stats.iter().map(|(_, s)| s.distance).sum();
        assert_eq!(sum, stats.total_distance());

        assert_eq!(stats.done.percent, Some(14));
        assert_eq!(stats.planned.percent, Some(43));
        assert_eq!(stats.postponed.percent, Some(29));
    }

    #[test]
    fn test_labels_and_classes() {
        let stats = get_stats(&[]).unwrap();
        assert_eq!(stats.done.label, "Réalisés");
        assert_eq!(stats.wip.label, "En travaux");
        assert_eq!(stats.planned.label, "Prévus");
        assert_eq!(stats.postponed.label, "Reportés");
        assert_eq!(stats.done.class, "text-lvv-blue-600 font-semibold");
        assert_eq!(stats.postponed.class, "text-lvv-pink font-semibold");
    }

    #[test]
    fn test_zero_total_policies() {
        let only_points = FeatureCollection::new(vec![PathFeature::new(
            FeatureProperties::default(),
            Geometry::Other {
                kind: "Point".to_string(),
            },
        )]);
        let collections = [only_points];

        let stats = get_stats(&collections).unwrap();
        assert_eq!(stats.total_distance(), 0);
        for (_, stat) in stats.iter() {
            assert_eq!(stat.distance, 0);
            assert_eq!(stat.percent, Some(0));
        }

        let config = StatsConfig {
            zero_total: ZeroTotalPolicy::Undefined,
            ..StatsConfig::default()
        };
        let stats = get_stats_with_config(&collections, &config).unwrap();
        assert!(stats.iter().all(|(_, stat)| stat.percent.is_none()));
    }

    #[test]
    fn test_excluded_ids_from_config() {
        let collection = FeatureCollection::new(vec![
            segment("keep", Status::Done, 0.01),
            segment("drop", Status::Planned, 0.01),
            segment(EXCLUDED_ID, Status::Variant, 0.01),
        ]);
        let config = StatsConfig {
            excluded_ids: vec!["drop".to_string()],
            ..StatsConfig::default()
        };

        let stats = get_stats_with_config(&[collection], &config).unwrap();
        assert_eq!(stats.done.distance, 1112);
        // Only the configured list applies
        assert_eq!(stats.planned.distance, 1112);
        assert_eq!(stats.done.percent, Some(50));
    }

    #[test]
    fn test_get_by_bucket() {
        let collection = FeatureCollection::new(vec![segment("w", Status::Wip, 0.01)]);
        let stats = get_stats(&[collection]).unwrap();
        assert_eq!(stats.get(Bucket::Wip).distance, 1112);
        assert_eq!(stats.get(Bucket::Wip).percent, Some(100));
        assert_eq!(stats.get(Bucket::Done).percent, Some(0));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: StatsConfig = serde_json::from_str(r#"{ "zero_total": "undefined" }"#).unwrap();
        assert_eq!(config.zero_total, ZeroTotalPolicy::Undefined);
        assert_eq!(config.excluded_ids, vec![EXCLUDED_ID.to_string()]);
    }
}
