//! Construction status of a path segment and its aggregation bucket.
//!
//! Every status maps to exactly one [`Bucket`], so the four bucket totals
//! always partition the measured network.

use serde::{Deserialize, Deserializer, Serialize};

/// Construction status carried by each mapped segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Done,
    Wip,
    Planned,
    Postponed,
    #[default]
    Unknown,
    Variant,
    VariantPostponed,
}

impl Status {
    /// Parse a status string. Unrecognized values become [`Status::Unknown`].
    ///
    /// The legacy spellings `variante` and `variante-postponed` are accepted.
    pub fn parse(value: &str) -> Self {
        match value {
            "done" => Status::Done,
            "wip" => Status::Wip,
            "planned" => Status::Planned,
            "postponed" => Status::Postponed,
            "variant" | "variante" => Status::Variant,
            "variant-postponed" | "variante-postponed" => Status::VariantPostponed,
            _ => Status::Unknown,
        }
    }

    /// The aggregation bucket this status counts towards.
    pub fn bucket(self) -> Bucket {
        match self {
            Status::Done => Bucket::Done,
            Status::Wip => Bucket::Wip,
            Status::Planned | Status::Unknown | Status::Variant => Bucket::Planned,
            Status::Postponed | Status::VariantPostponed => Bucket::Postponed,
        }
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `"status": null` is treated like a missing status
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map(|v| Status::parse(&v)).unwrap_or_default())
    }
}

/// One of the four disjoint categories used for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    Done,
    Wip,
    Planned,
    Postponed,
}

impl Bucket {
    /// All buckets, in display order.
    pub const ALL: [Bucket; 4] = [Bucket::Done, Bucket::Wip, Bucket::Planned, Bucket::Postponed];

    /// Position of the bucket in [`Bucket::ALL`].
    pub fn index(self) -> usize {
        match self {
            Bucket::Done => 0,
            Bucket::Wip => 1,
            Bucket::Planned => 2,
            Bucket::Postponed => 3,
        }
    }

    /// Display label shown next to the bucket total.
    pub fn label(self) -> &'static str {
        match self {
            Bucket::Done => DONE_LABEL,
            Bucket::Wip => WIP_LABEL,
            Bucket::Planned => PLANNED_LABEL,
            Bucket::Postponed => POSTPONED_LABEL,
        }
    }

    /// Style class handed through to the presentation layer.
    pub fn class(self) -> &'static str {
        match self {
            Bucket::Done => DONE_CLASS,
            Bucket::Wip => WIP_CLASS,
            Bucket::Planned => PLANNED_CLASS,
            Bucket::Postponed => POSTPONED_CLASS,
        }
    }
}

pub const DONE_LABEL: &str = "Réalisés";
pub const WIP_LABEL: &str = "En travaux";
pub const PLANNED_LABEL: &str = "Prévus";
pub const POSTPONED_LABEL: &str = "Reportés";

pub const DONE_CLASS: &str = "text-lvv-blue-600 font-semibold";
pub const WIP_CLASS: &str = "text-lvv-blue-600 font-normal";
pub const PLANNED_CLASS: &str = "text-black font-semibold";
pub const POSTPONED_CLASS: &str = "text-lvv-pink font-semibold";
