// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Export of edited polygons.
//!
//! Two outputs are derived from the same collections: a YAML fragment the
//! operator can paste into the NVR configuration file, and the key/value
//! pairs of a `config/set` request.

use crate::codec::encode_normalized;
use crate::editor::collections::MaskCollections;
use crate::editor::session::{CollectionKind, EditTarget};
use crate::models::polygon::Polygon;

/// What a line of the fragment stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRole {
    /// Structural key line (`motion:`, `mask:`, ...).
    Heading,
    /// The name line of an object filter.
    ObjectHeading(String),
    /// A line carrying one polygon.
    Polygon(EditTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentLine {
    pub text: String,
    pub role: LineRole,
}

impl FragmentLine {
    fn heading(text: impl Into<String>) -> Self {
        Self { text: text.into(), role: LineRole::Heading }
    }

    fn polygon(prefix: &str, polygon: &Polygon, target: EditTarget, width: u32, height: u32) -> Self {
        Self {
            text: format!("{}{}", prefix, encode_normalized(polygon, width, height)),
            role: LineRole::Polygon(target),
        }
    }
}

/// Lines of the YAML fragment for one collection.
///
/// With `include_empty` the listing also carries polygons without points
/// and object filters without masks, so they can be selected for editing;
/// without it only persistable content is emitted.
pub fn fragment_lines(
    kind: CollectionKind,
    collections: &MaskCollections,
    width: u32,
    height: u32,
    include_empty: bool,
) -> Vec<FragmentLine> {
    let keep = |polygon: &Polygon| include_empty || !polygon.is_empty();
    let mut lines = Vec::new();
    match kind {
        CollectionKind::MotionMasks => {
            lines.push(FragmentLine::heading("  motion:"));
            lines.push(FragmentLine::heading("    mask:"));
            for (i, polygon) in collections.motion_masks.iter().enumerate() {
                if keep(polygon) {
                    lines.push(FragmentLine::polygon(
                        "      - ",
                        polygon,
                        EditTarget::MotionMask(i),
                        width,
                        height,
                    ));
                }
            }
        }
        CollectionKind::Zones => {
            lines.push(FragmentLine::heading("  zones:"));
            for (name, polygon) in &collections.zones {
                if keep(polygon) {
                    lines.push(FragmentLine::heading(format!("    {}:", name)));
                    lines.push(FragmentLine::polygon(
                        "      coordinates: ",
                        polygon,
                        EditTarget::Zone(name.clone()),
                        width,
                        height,
                    ));
                }
            }
        }
        CollectionKind::ObjectMasks => {
            lines.push(FragmentLine::heading("  objects:"));
            lines.push(FragmentLine::heading("    filters:"));
            for (name, polygons) in &collections.object_masks {
                let kept: Vec<(usize, &Polygon)> = polygons
                    .iter()
                    .enumerate()
                    .filter(|(_, polygon)| keep(polygon))
                    .collect();
                if kept.is_empty() && !include_empty {
                    continue;
                }
                lines.push(FragmentLine {
                    text: format!("      {}:", name),
                    role: LineRole::ObjectHeading(name.clone()),
                });
                lines.push(FragmentLine::heading("        mask:"));
                for (i, polygon) in kept {
                    lines.push(FragmentLine::polygon(
                        "          - ",
                        polygon,
                        EditTarget::ObjectMask(name.clone(), i),
                        width,
                        height,
                    ));
                }
            }
        }
    }
    // Bare headers would parse as `null` in the configuration file.
    if !include_empty && !lines.iter().any(|line| matches!(line.role, LineRole::Polygon(_))) {
        lines.clear();
    }
    lines
}

/// YAML fragment for the clipboard.
pub fn yaml_fragment(kind: CollectionKind, collections: &MaskCollections, width: u32, height: u32) -> String {
    fragment_lines(kind, collections, width, height, false)
        .into_iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `config/set` key/value pairs addressing every non-empty polygon of one collection.
pub fn set_config_pairs(
    camera: &str,
    kind: CollectionKind,
    collections: &MaskCollections,
    width: u32,
    height: u32,
) -> Vec<(String, String)> {
    let encode = |polygon: &Polygon| encode_normalized(polygon, width, height);
    match kind {
        CollectionKind::MotionMasks => collections
            .motion_masks
            .iter()
            .filter(|polygon| !polygon.is_empty())
            .enumerate()
            .map(|(i, polygon)| (format!("cameras.{}.motion.mask.{}", camera, i), encode(polygon)))
            .collect(),
        CollectionKind::Zones => collections
            .zones
            .iter()
            .filter(|(_, polygon)| !polygon.is_empty())
            .map(|(name, polygon)| {
                (format!("cameras.{}.zones.{}.coordinates", camera, name), encode(polygon))
            })
            .collect(),
        CollectionKind::ObjectMasks => collections
            .object_masks
            .iter()
            .flat_map(|(name, polygons)| {
                polygons
                    .iter()
                    .filter(|polygon| !polygon.is_empty())
                    .enumerate()
                    .map(move |(i, polygon)| {
                        (
                            format!("cameras.{}.objects.filters.{}.mask.{}", camera, name, i),
                            encode(polygon),
                        )
                    })
            })
            .collect(),
    }
}

/// Join pairs into a query string, as shown in logs.
pub fn query_string(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn collections() -> MaskCollections {
        let mut zones = BTreeMap::new();
        zones.insert("porch".to_string(), Polygon::from(vec![(0, 50), (50, 50), (50, 100)]));
        zones.insert("zone_0".to_string(), Polygon::default());
        let mut object_masks = BTreeMap::new();
        object_masks.insert(
            "person".to_string(),
            vec![Polygon::default(), Polygon::from(vec![(100, 0), (100, 100), (50, 100)])],
        );
        object_masks.insert("car".to_string(), Vec::new());
        MaskCollections {
            motion_masks: vec![
                Polygon::from(vec![(0, 0), (100, 0), (100, 10)]),
                Polygon::default(),
                Polygon::from(vec![(50, 50)]),
            ],
            zones,
            object_masks,
        }
    }

    #[test]
    fn test_motion_fragment() {
        assert_eq!(
            yaml_fragment(CollectionKind::MotionMasks, &collections(), 100, 100),
            "  motion:\n    mask:\n      - 0.000,0.000,1.000,0.000,1.000,0.100\n      - 0.500,0.500"
        );
    }

    #[test]
    fn test_zone_fragment_skips_empty_zones() {
        assert_eq!(
            yaml_fragment(CollectionKind::Zones, &collections(), 100, 100),
            "  zones:\n    porch:\n      coordinates: 0.000,0.500,0.500,0.500,0.500,1.000"
        );
    }

    #[test]
    fn test_object_fragment_parses_as_yaml() {
        let text = yaml_fragment(CollectionKind::ObjectMasks, &collections(), 100, 100);
        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        let masks = &value["objects"]["filters"]["person"]["mask"];
        assert_eq!(masks[0].as_str(), Some("1.000,0.000,1.000,1.000,0.500,1.000"));
        assert!(value["objects"]["filters"].get("car").is_none());
    }

    #[test]
    fn test_listing_keeps_empty_entries_selectable() {
        let lines = fragment_lines(CollectionKind::ObjectMasks, &collections(), 100, 100, true);
        assert!(lines.contains(&FragmentLine {
            text: "      car:".to_string(),
            role: LineRole::ObjectHeading("car".to_string()),
        }));
        let targets: Vec<_> = lines
            .iter()
            .filter_map(|line| match &line.role {
                LineRole::Polygon(target) => Some(target.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            targets,
            [
                EditTarget::ObjectMask("person".into(), 0),
                EditTarget::ObjectMask("person".into(), 1)
            ]
        );
    }

    #[test]
    fn test_collection_without_points_exports_nothing() {
        let mut c = MaskCollections {
            motion_masks: vec![Polygon::default()],
            ..collections()
        };
        c.object_masks.insert("person".to_string(), vec![Polygon::default()]);
        for kind in [CollectionKind::MotionMasks, CollectionKind::ObjectMasks] {
            assert_eq!(yaml_fragment(kind, &c, 100, 100), "");
            assert!(set_config_pairs("front", kind, &c, 100, 100).is_empty());
        }
        let empty = MaskCollections::default();
        assert_eq!(yaml_fragment(CollectionKind::Zones, &empty, 100, 100), "");
        assert!(set_config_pairs("front", CollectionKind::Zones, &empty, 100, 100).is_empty());
    }

    #[test]
    fn test_listing_keeps_headers_of_empty_collections() {
        let lines = fragment_lines(CollectionKind::MotionMasks, &MaskCollections::default(), 100, 100, true);
        let text: Vec<_> = lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(text, ["  motion:", "    mask:"]);
    }

    #[test]
    fn test_set_config_pairs() {
        let c = collections();
        assert_eq!(
            set_config_pairs("front", CollectionKind::MotionMasks, &c, 100, 100),
            [
                ("cameras.front.motion.mask.0".to_string(), "0.000,0.000,1.000,0.000,1.000,0.100".to_string()),
                ("cameras.front.motion.mask.1".to_string(), "0.500,0.500".to_string()),
            ]
        );
        assert_eq!(
            set_config_pairs("front", CollectionKind::ObjectMasks, &c, 100, 100),
            [(
                "cameras.front.objects.filters.person.mask.0".to_string(),
                "1.000,0.000,1.000,1.000,0.500,1.000".to_string()
            )]
        );
        let zones = set_config_pairs("front", CollectionKind::Zones, &c, 100, 100);
        assert_eq!(
            query_string(&zones),
            "cameras.front.zones.porch.coordinates=0.000,0.500,0.500,0.500,0.500,1.000"
        );
    }
}
