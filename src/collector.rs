//! Merging of several datasets into one deduplicated list of segments.
//!
//! Datasets overlap: the same logical segment may be published by more than
//! one line. Segments are matched by `id` and the first copy encountered
//! (collection order, then feature order) is kept.

use std::collections::HashSet;

use log::debug;

use crate::{FeatureCollection, PathFeature};

/// Segment id that is never counted, wherever it appears.
pub const EXCLUDED_ID: &str = "variant2";

/// Flatten `collections` and return the unique LineString segments, in order.
///
/// - Non-LineString features are dropped.
/// - Features without an id are always kept.
/// - Features with id [`EXCLUDED_ID`] are always dropped.
/// - For any other id, only the first occurrence is kept.
///
/// # Example
/// ```
/// use bikeway_stats::{get_all_uniq_line_strings, FeatureCollection, PathFeature, Status};
///
/// let a = FeatureCollection::new(vec![
///     PathFeature::line_string(Some("s1"), Status::Done, &[(4.80, 45.70), (4.81, 45.70)]),
/// ]);
/// let b = FeatureCollection::new(vec![
///     PathFeature::line_string(Some("s1"), Status::Planned, &[(4.80, 45.70), (4.81, 45.70)]),
/// ]);
///
/// let collections = [a, b];
/// let unique = get_all_uniq_line_strings(&collections);
/// assert_eq!(unique.len(), 1);
/// assert_eq!(unique[0].status(), Status::Done);
/// ```
pub fn get_all_uniq_line_strings(collections: &[FeatureCollection]) -> Vec<&PathFeature> {
    get_all_uniq_line_strings_excluding(collections, &[EXCLUDED_ID])
}

/// Same as [`get_all_uniq_line_strings`] with an explicit list of excluded ids.
pub fn get_all_uniq_line_strings_excluding<'a, S: AsRef<str>>(
    collections: &'a [FeatureCollection],
    excluded_ids: &[S],
) -> Vec<&'a PathFeature> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut flattened = 0usize;
    let mut excluded = 0usize;
    let mut duplicates = 0usize;

    let unique: Vec<&PathFeature> = collections
        .iter()
        .flat_map(|collection| collection.line_strings())
        .filter(|feature| {
            let feature: &'a PathFeature = *feature;
            flattened += 1;
            match feature.id() {
                None => true,
                Some(id) if excluded_ids.iter().any(|x| x.as_ref() == id) => {
                    excluded += 1;
                    false
                }
                Some(id) => {
                    let first = seen.insert(id);
                    if !first {
                        duplicates += 1;
                    }
                    first
                }
            }
        })
        .collect();

    debug!(
        "[Collector] {} collections, {} LineStrings, {} excluded, {} duplicates dropped, {} kept",
        collections.len(),
        flattened,
        excluded,
        duplicates,
        unique.len()
    );

    unique
}
