//! Integration tests for the stats pipeline on GeoJSON datasets

use bikeway_stats::{
    display_distance_in_km, display_optional_percent, display_percent, get_all_uniq_line_strings,
    get_distance, get_stats, get_stats_with_config, Bucket, FeatureCollection, PathFeature, Status,
    StatsConfig, ZeroTotalPolicy,
};

const LINE_1: &str = include_str!("fixtures/line-1.geojson");
const LINE_2: &str = include_str!("fixtures/line-2.geojson");

fn load(text: &str) -> FeatureCollection {
    FeatureCollection::from_json(text).unwrap()
}

#[test]
fn test_collect_merged_datasets() {
    let collections = [load(LINE_1), load(LINE_2)];
    let unique = get_all_uniq_line_strings(&collections);

    let names: Vec<&str> = unique.iter().map(|f| f.properties.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Quai Augagneur",
            "Pont Lafayette",
            "Cours Gambetta",
            "Place Jean Macé",
            "Extension sud",
            "Amorce",
        ]
    );
    // The bridge comes from the first dataset
    assert_eq!(unique[1].status(), Status::Wip);
    assert_eq!(unique[1].properties.line, Some(1));
}

#[test]
fn test_stats_for_merged_datasets() {
    let stats = get_stats(&[load(LINE_1), load(LINE_2)]).unwrap();

    assert_eq!(stats.total_distance(), 6672);
    assert_eq!(stats.done.distance, 2224);
    assert_eq!(stats.wip.distance, 1112);
    assert_eq!(stats.planned.distance, 2224);
    assert_eq!(stats.postponed.distance, 1112);

    assert_eq!(stats.done.percent, Some(33));
    assert_eq!(stats.wip.percent, Some(17));
    assert_eq!(stats.planned.percent, Some(33));
    assert_eq!(stats.postponed.percent, Some(17));
}

#[test]
fn test_dataset_order_changes_the_winner() {
    let stats = get_stats(&[load(LINE_2), load(LINE_1)]).unwrap();

    assert_eq!(stats.total_distance(), 6672);
    assert_eq!(stats.wip.distance, 0);
    assert_eq!(stats.planned.distance, 3336);
    assert_eq!(stats.wip.percent, Some(0));
    assert_eq!(stats.planned.percent, Some(50));
}

#[test]
fn test_total_matches_measurer() {
    let collections = [load(LINE_1), load(LINE_2)];
    let unique = get_all_uniq_line_strings(&collections);
    let stats = get_stats(&collections).unwrap();

    assert_eq!(get_distance(unique.iter().copied()).unwrap(), stats.total_distance());
    let bucket_sum: u64 = Bucket::ALL.iter().map(|&b| stats.get(b).distance).sum();
    assert_eq!(bucket_sum, stats.total_distance());
}

#[test]
fn test_two_buckets_share_one_hundred_percent() {
    let collection = FeatureCollection::new(vec![
        PathFeature::line_string(Some("d"), Status::Done, &[(0.0, 0.0), (0.0, 0.02)]),
        PathFeature::line_string(Some("p"), Status::Planned, &[(1.0, 0.0), (1.0, 0.01)]),
    ]);
    let stats = get_stats(&[collection]).unwrap();

    assert_eq!(stats.done.percent, Some(67));
    assert_eq!(stats.planned.percent, Some(33));
    assert_eq!(
        stats.done.percent.unwrap() + stats.planned.percent.unwrap(),
        100
    );
}

#[test]
fn test_stats_are_deterministic() {
    let collections = [load(LINE_1), load(LINE_2)];
    let first = get_stats(&collections).unwrap();
    let second = get_stats(&collections).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_no_measurable_segments() {
    let points = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "status": "done" }, "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } }
        ]
    }"#;
    let collections = [load(points), FeatureCollection::default()];

    let stats = get_stats(&collections).unwrap();
    assert_eq!(stats.total_distance(), 0);
    assert!(stats.iter().all(|(_, s)| s.percent == Some(0)));

    let config = StatsConfig {
        zero_total: ZeroTotalPolicy::Undefined,
        ..StatsConfig::default()
    };
    let stats = get_stats_with_config(&collections, &config).unwrap();
    let json = serde_json::to_value(&stats).unwrap();
    assert!(json["done"]["percent"].is_null());
    assert_eq!(display_optional_percent(stats.done.percent), "-");
    assert_eq!(json["done"]["distance"], 0);
}

#[test]
fn test_stats_json_shape() {
    let stats = get_stats(&[load(LINE_1), load(LINE_2)]).unwrap();
    let json = serde_json::to_value(&stats).unwrap();

    assert_eq!(
        json["done"],
        serde_json::json!({
            "name": "Réalisés",
            "distance": 2224,
            "percent": 33,
            "class": "text-lvv-blue-600 font-semibold"
        })
    );
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 4);
}

#[test]
fn test_display_of_stats() {
    let stats = get_stats(&[load(LINE_1), load(LINE_2)]).unwrap();

    assert_eq!(display_distance_in_km(stats.done.distance as f64), "2.22 km");
    assert_eq!(display_distance_in_km(stats.total_distance() as f64), "6.67 km");
    assert_eq!(display_percent(stats.wip.percent.unwrap()), "17%");
    assert_eq!(display_optional_percent(stats.postponed.percent), "17%");
    assert_eq!(display_distance_in_km(0.0), "0 km");
}
