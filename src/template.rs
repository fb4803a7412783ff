// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/template.rs - Ready-made Factorio blueprint documents.
 *  Copyright (C) 2026  Forest Crossman <cyrozap@gmail.com>
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

/*!
 * # `template` Module
 *
 * Builders for blueprint documents that are generated rather than decoded.
 * The documents are plain [Value] trees, ready for [crate::encode].
 *
 * ## Usage Example
 *
 * ```
 * use factorio_blueprint::encode_default;
 * use factorio_blueprint::template::gem_constant_combinator;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     let blueprint = encode_default(&gem_constant_combinator())?;
 *     assert!(blueprint.starts_with("0eJ"));
 *     Ok(())
 * }
 * ```
 */

use serde_json::{Value, json};

/// Tier 4 gems, in filter order.
pub const GEM_ITEMS: [&str; 6] = [
    "bob-ruby-4",
    "bob-sapphire-4",
    "bob-emerald-4",
    "bob-amethyst-4",
    "bob-topaz-4",
    "bob-diamond-4",
];

/// Item quality tiers, lowest first.
pub const QUALITY_TIERS: [&str; 5] = ["normal", "uncommon", "rare", "epic", "legendary"];

/// Packed game version 2.0.73.1.
pub const GEM_COMBINATOR_VERSION: u64 = 562949958205441;

/// Builds one `= 1` filter per item and quality, all items of the lowest
/// quality first. Filter indices start at 1.
pub fn quality_filters(items: &[&str], qualities: &[&str]) -> Vec<Value> {
    qualities
        .iter()
        .flat_map(|quality| items.iter().map(move |item| (*item, *quality)))
        .enumerate()
        .map(|(i, (item, quality))| {
            json!({
                "index": i + 1,
                "name": item,
                "quality": quality,
                "comparator": "=",
                "count": 1,
            })
        })
        .collect()
}

/// A single constant combinator at (989.5, 455.5), facing west, that
/// outputs one of every [GEM_ITEMS] item in every [QUALITY_TIERS] quality.
pub fn gem_constant_combinator() -> Value {
    json!({
        "blueprint": {
            "icons": [
                {
                    "signal": {"name": "constant-combinator"},
                    "index": 1,
                },
            ],
            "entities": [
                {
                    "entity_number": 1,
                    "name": "constant-combinator",
                    "position": {"x": 989.5, "y": 455.5},
                    "direction": 12,
                    "control_behavior": {
                        "sections": {
                            "sections": [
                                {
                                    "index": 1,
                                    "filters": quality_filters(&GEM_ITEMS, &QUALITY_TIERS),
                                },
                            ],
                        },
                    },
                },
            ],
            "item": "blueprint",
            "version": GEM_COMBINATOR_VERSION,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::DecodedBlueprintString;
    use crate::interpreter::BlueprintSummary;
    use crate::{EncodeOptions, decode, encode_default, encode_with_options};

    #[test]
    fn test_quality_filters() {
        let filters = quality_filters(&["a", "b"], &["normal", "rare"]);
        assert_eq!(
            filters,
            vec![
                json!({"index": 1, "name": "a", "quality": "normal", "comparator": "=", "count": 1}),
                json!({"index": 2, "name": "b", "quality": "normal", "comparator": "=", "count": 1}),
                json!({"index": 3, "name": "a", "quality": "rare", "comparator": "=", "count": 1}),
                json!({"index": 4, "name": "b", "quality": "rare", "comparator": "=", "count": 1}),
            ]
        );
        assert!(quality_filters(&[], &QUALITY_TIERS).is_empty());
    }

    #[test]
    fn test_gem_constant_combinator_roundtrip() {
        let document = gem_constant_combinator();
        let (decoded, version_tag) = decode(&encode_default(&document).unwrap()).unwrap();
        assert_eq!(version_tag, '0');
        assert_eq!(decoded, document);

        let entity = &decoded["blueprint"]["entities"][0];
        assert_eq!(entity["name"].as_str(), Some("constant-combinator"));
        assert_eq!(entity["position"]["x"].as_f64(), Some(989.5));
        assert_eq!(entity["position"]["y"].as_f64(), Some(455.5));
        assert_eq!(entity["direction"].as_u64(), Some(12));

        let filters = entity["control_behavior"]["sections"]["sections"][0]["filters"]
            .as_array()
            .unwrap();
        assert_eq!(filters.len(), 30);
        for (i, filter) in filters.iter().enumerate() {
            assert_eq!(filter["index"].as_u64(), Some(i as u64 + 1));
            assert_eq!(filter["name"].as_str(), Some(GEM_ITEMS[i % 6]));
            assert_eq!(filter["quality"].as_str(), Some(QUALITY_TIERS[i / 6]));
            let keys: Vec<&str> = filter.as_object().unwrap().keys().map(String::as_str).collect();
            assert_eq!(keys, ["index", "name", "quality", "comparator", "count"]);
        }

        assert_eq!(
            BlueprintSummary::from_document(&decoded).to_string(),
            "Type: Blueprint\nEntities: 1\n  - constant-combinator: 1\nVersion: 2.0.73.1 (562949958205441)\n"
        );
    }

    #[test]
    fn test_gem_constant_combinator_layout() {
        let blueprint =
            encode_with_options(&gem_constant_combinator(), '0', EncodeOptions::spaced()).unwrap();
        let payload = DecodedBlueprintString::new(&blueprint).unwrap().payload;
        let text = String::from_utf8(payload).unwrap();
        assert_eq!(text.len(), 3073);
        assert!(text.starts_with(
            r#"{"blueprint": {"icons": [{"signal": {"name": "constant-combinator"}, "index": 1}], "entities": [{"entity_number": 1, "name": "constant-combinator", "position": {"x": 989.5, "y": 455.5}, "direction": 12, "control_behavior": {"sections": {"sections": [{"index": 1, "filters": [{"index": 1, "name": "bob-ruby-4", "quality": "normal", "comparator": "=", "count": 1}, "#
        ));
        assert!(text.ends_with(
            r#"{"index": 30, "name": "bob-diamond-4", "quality": "legendary", "comparator": "=", "count": 1}]}]}}}], "item": "blueprint", "version": 562949958205441}}"#
        ));
    }
}
