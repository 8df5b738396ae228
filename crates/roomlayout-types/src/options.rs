//! Format revision switches.
//!
//! Layout files exist in revisions that disagree on the slot record length and
//! on how the points-of-interest lists are delimited. Nothing in a file says
//! which revision it is, so callers that know may pin one; the `Any` defaults
//! accept both and decide per line.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Accepted field counts for a `k` (slot) record.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SlotFields {
    /// 23 or 24 fields.
    #[default]
    Any,
    /// Exactly 23 fields; the anchor is always `sw`.
    Legacy,
    /// Exactly 24 fields, the last being the anchor selector.
    Anchored,
}

impl SlotFields {
    pub const LEGACY_LEN: usize = 23;
    pub const ANCHORED_LEN: usize = 24;

    pub fn accepts(self, count: usize) -> bool {
        match self {
            SlotFields::Any => count == Self::LEGACY_LEN || count == Self::ANCHORED_LEN,
            SlotFields::Legacy => count == Self::LEGACY_LEN,
            SlotFields::Anchored => count == Self::ANCHORED_LEN,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            SlotFields::Any => "23 or 24",
            SlotFields::Legacy => "23",
            SlotFields::Anchored => "24",
        }
    }
}

/// Which list encodings the points-of-interest grammar accepts.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PoiStyle {
    #[default]
    Any,
    /// Count line followed by that many lines.
    Counted,
    /// Multi-token lines closed by a `-1` line.
    Grouped,
}

impl PoiStyle {
    pub fn allows_counted(self) -> bool {
        self != PoiStyle::Grouped
    }

    pub fn allows_grouped(self) -> bool {
        self != PoiStyle::Counted
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub slot_fields: SlotFields,
    pub poi_style: PoiStyle,
}

impl ParseOptions {
    /// 23-field slots with count-prefixed lists.
    pub const COUNTED: Self = Self {
        slot_fields: SlotFields::Legacy,
        poi_style: PoiStyle::Counted,
    };

    /// 24-field slots with sentinel-closed groups.
    pub const GROUPED: Self = Self {
        slot_fields: SlotFields::Anchored,
        poi_style: PoiStyle::Grouped,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn slot_field_counts() {
        assert!(SlotFields::Any.accepts(23));
        assert!(SlotFields::Any.accepts(24));
        assert!(!SlotFields::Any.accepts(22));
        assert!(SlotFields::Legacy.accepts(23));
        assert!(!SlotFields::Legacy.accepts(24));
        assert!(!SlotFields::Anchored.accepts(23));
    }

    #[test]
    fn names_parse_in_snake_case() {
        assert_eq!(SlotFields::from_str("anchored"), Ok(SlotFields::Anchored));
        assert_eq!(PoiStyle::from_str("counted"), Ok(PoiStyle::Counted));
        assert_eq!(PoiStyle::Grouped.to_string(), "grouped");
        assert!(PoiStyle::from_str("both").is_err());
    }

    #[test]
    fn style_permissions() {
        assert!(PoiStyle::Any.allows_counted() && PoiStyle::Any.allows_grouped());
        assert!(!PoiStyle::Counted.allows_grouped());
        assert!(!PoiStyle::Grouped.allows_counted());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: ParseOptions =
            serde_json::from_str(r#"{"poi_style":"grouped"}"#).expect("deserialize");
        assert_eq!(opts.slot_fields, SlotFields::Any);
        assert_eq!(opts.poi_style, PoiStyle::Grouped);
    }
}
