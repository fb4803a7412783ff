// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/lib.rs - Decoder and encoder library for Factorio blueprint strings.
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
 * # `factorio_blueprint` Crate
 *
 * A library for decoding, editing, and re-encoding Factorio blueprint
 * strings.
 *
 * A blueprint string is a single version character followed by the base64
 * encoding of a zlib-compressed JSON document. This crate provides the full
 * pipeline in both directions:
 *
 * 1. [decoder]: Splits off the version tag, then decodes and decompresses
 *    the payload.
 * 2. [parser]: Converts the JSON payload into a [Value] document, and loads
 *    and saves documents as JSON files.
 * 3. [encoder]: Serializes, compresses, and encodes a document back into a
 *    blueprint string.
 * 4. [interpreter]: Summarizes the contents of a decoded document.
 *
 * Documents are [serde_json::Value] trees built with the `preserve_order`
 * feature, so object keys come back out in the order they went in, and
 * integers stay exact over the whole 64-bit range. [template] builds
 * ready-made documents from scratch.
 *
 * [decode] and [encode] run the whole pipeline in one call. Decoding and
 * re-encoding preserves the document exactly, including the order of
 * object keys.
 *
 * ## Usage Example
 *
 * ```
 * use factorio_blueprint::{Value, decode, encode};
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     let blueprint = "0eJyVUdtKxEAM/ZVlnl3Yrq6rPizob4gM0zargc6FTKZYSv/dTFrQBxF8muSc5OQkM5t2KJAIA5un3WywiyFL9DqbjO/BDYrylEACgwze3OxMcF7zHjrsgfZd9C0Gx5HMIjSGHj6Fb5Y3ySAwMsKmqtlkQ/EtUK35W07YFLP0x6BOquxBwKm+dVaPBN1GV0L8M8XBtvDhRoykXZuwFbJXrazwFSmz/WXPEYmLYD+8rVX7Z12wHomdnmyd6ZMj9SuVl9oWC6fyT+2XTTtNYrQEtleK3mIQIam6uiHDsuhJ9R+k8fvvBByB8nqH40Nzd348nk/Nqbm9PyzLF/gIndQ=";
 *
 *     // Decode the string
 *     let (mut document, version_tag) = decode(blueprint)?;
 *
 *     // Edit the document
 *     if let Some(constant) =
 *         document.pointer_mut("/blueprint/entities/0/control_behavior/decider_conditions/constant")
 *     {
 *         *constant = Value::from(50);
 *     }
 *
 *     // Re-encode it
 *     let modified = encode(&document, version_tag)?;
 *     assert_eq!(decode(&modified)?, (document, version_tag));
 *
 *     Ok(())
 * }
 * ```
 */

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod template;

pub use encoder::EncodeOptions;
pub use error::{Error, ErrorKind, Result};
pub use interpreter::{BlueprintSummary, GameVersion};
pub use parser::JsonLayout;
pub use serde_json::{Map, Number, Value};

use decoder::DecodedBlueprintString;
use parser::ParsedBlueprint;

/// The version tag used when none is given.
pub const DEFAULT_VERSION_TAG: char = '0';

/// Decodes a blueprint string into its document and version tag.
///
/// Surrounding whitespace is ignored. Each stage fails with its own error
/// kind: [ErrorKind::Encoding] for a bad base64 body, [ErrorKind::Compression]
/// for a corrupt or truncated zlib stream, and [ErrorKind::Format] for a
/// payload that is not UTF-8 JSON.
pub fn decode(blueprint: &str) -> Result<(Value, char)> {
    let decoded = DecodedBlueprintString::new(blueprint)?;
    let parsed = ParsedBlueprint::from_decoded(&decoded)?;
    Ok((parsed.document, parsed.version_tag))
}

/// Encodes a document into a blueprint string with compact JSON.
pub fn encode(document: &Value, version_tag: char) -> Result<String> {
    encode_with_options(document, version_tag, EncodeOptions::default())
}

/// Encodes a document with [DEFAULT_VERSION_TAG].
pub fn encode_default(document: &Value) -> Result<String> {
    encode(document, DEFAULT_VERSION_TAG)
}

/// Encodes a document using the JSON layout and zlib level in `options`.
pub fn encode_with_options(
    document: &Value,
    version_tag: char,
    options: EncodeOptions,
) -> Result<String> {
    encoder::encode_document(document, version_tag, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;
    use serde_json::json;

    const SAMPLE: &str = "0eJyVUdtKxEAM/ZVlnl3Yrq6rPizob4gM0zargc6FTKZYSv/dTFrQBxF8muSc5OQkM5t2KJAIA5un3WywiyFL9DqbjO/BDYrylEACgwze3OxMcF7zHjrsgfZd9C0Gx5HMIjSGHj6Fb5Y3ySAwMsKmqtlkQ/EtUK35W07YFLP0x6BOquxBwKm+dVaPBN1GV0L8M8XBtvDhRoykXZuwFbJXrazwFSmz/WXPEYmLYD+8rVX7Z12wHomdnmyd6ZMj9SuVl9oWC6fyT+2XTTtNYrQEtleK3mIQIam6uiHDsuhJ9R+k8fvvBByB8nqH40Nzd348nk/Nqbm9PyzLF/gIndQ=";

    #[derive(Clone, Debug)]
    struct Document(Value);

    impl Arbitrary for Document {
        fn arbitrary(g: &mut Gen) -> Self {
            Document(arbitrary_value(g, 3))
        }
    }

    fn arbitrary_value(g: &mut Gen, depth: usize) -> Value {
        let variants = if depth == 0 { 6 } else { 8 };
        match u8::arbitrary(g) % variants {
            0 => Value::Null,
            1 => Value::Bool(bool::arbitrary(g)),
            2 => Value::from(i64::arbitrary(g)),
            3 => Value::from(u64::arbitrary(g)),
            4 => {
                let v = f64::arbitrary(g);
                Value::from(if v.is_finite() { v } else { 0.5 })
            }
            5 => Value::String(String::arbitrary(g)),
            6 => {
                let len = usize::arbitrary(g) % 4;
                Value::Array((0..len).map(|_| arbitrary_value(g, depth - 1)).collect())
            }
            _ => {
                let len = usize::arbitrary(g) % 4;
                Value::Object(
                    (0..len)
                        .map(|_| (String::arbitrary(g), arbitrary_value(g, depth - 1)))
                        .collect(),
                )
            }
        }
    }

    fn decider_document() -> Value {
        parser::parse_document(
            br#"{"blueprint": {"entities": [{"entity_number": 1, "name": "decider-combinator", "position": {"x": 0, "y": 0}, "control_behavior": {"decider_conditions": {"first_signal": {"type": "virtual", "name": "signal-0"}, "constant": 0, "comparator": ">", "output_signal": {"type": "virtual", "name": "signal-each"}, "copy_count_from_input": true}}}], "item": "blueprint", "version": 281479275151360}}"#,
        )
        .unwrap()
    }

    #[quickcheck]
    fn roundtrip_identity(document: Document, version_tag: char) -> bool {
        match encode(&document.0, version_tag) {
            Ok(blueprint) => decode(&blueprint).unwrap() == (document.0, version_tag),
            Err(Error::InvalidVersionTag(_)) => version_tag.is_whitespace(),
            Err(_) => false,
        }
    }

    #[quickcheck]
    fn roundtrip_identity_spaced(document: Document) -> bool {
        let blueprint =
            encode_with_options(&document.0, DEFAULT_VERSION_TAG, EncodeOptions::spaced()).unwrap();
        decode(&blueprint).unwrap() == (document.0, DEFAULT_VERSION_TAG)
    }

    #[test]
    fn test_decider_roundtrip() {
        let document = decider_document();
        let blueprint = encode(&document, '0').unwrap();
        assert!(blueprint.starts_with('0'));
        assert_eq!(decode(&blueprint).unwrap(), (document, '0'));
    }

    #[test]
    fn test_decode_sample() {
        let (document, version_tag) = decode(SAMPLE).unwrap();
        assert_eq!(version_tag, '0');

        let entities = document["blueprint"]["entities"].as_array().unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0]["name"].as_str(), Some("decider-combinator"));
        assert!(
            entities[0]["control_behavior"]["decider_conditions"]
                .as_object()
                .is_some()
        );
        assert_eq!(document["blueprint"]["version"].as_u64(), Some(281479275151360));
    }

    #[test]
    fn test_sample_stability() {
        let (document, version_tag) = decode(SAMPLE).unwrap();

        let compact = encode(&document, version_tag).unwrap();
        assert_eq!(decode(&compact).unwrap(), (document.clone(), version_tag));

        // The sample was written with spaced JSON, so the spaced layout
        // reproduces its payload exactly.
        let spaced = encode_with_options(&document, version_tag, EncodeOptions::spaced()).unwrap();
        assert_eq!(
            DecodedBlueprintString::new(&spaced).unwrap().payload,
            DecodedBlueprintString::new(SAMPLE).unwrap().payload
        );
    }

    #[test]
    fn test_tag_isolation() {
        let document = decider_document();
        let zero = encode(&document, '0').unwrap();
        let one = encode(&document, '1').unwrap();
        assert_eq!(zero[1..], one[1..]);

        let (from_zero, _) = decode(&zero).unwrap();
        let (from_one, tag) = decode(&one).unwrap();
        assert_eq!(tag, '1');
        assert_eq!(from_zero, from_one);
    }

    #[test]
    fn test_key_order() {
        for order in [["a", "b", "c"], ["c", "a", "b"], ["b", "c", "a"]] {
            let document = Value::Object(
                order
                    .iter()
                    .map(|key| (key.to_string(), json!(key)))
                    .collect(),
            );
            let (decoded, _) = decode(&encode_default(&document).unwrap()).unwrap();
            let keys: Vec<&str> = decoded
                .as_object()
                .unwrap()
                .keys()
                .map(String::as_str)
                .collect();
            assert_eq!(keys, order);
        }
    }

    #[test]
    fn test_empty_entities() {
        let document = json!({"blueprint": {"entities": [], "item": "blueprint"}});
        let (decoded, _) = decode(&encode_default(&document).unwrap()).unwrap();
        assert_eq!(decoded["blueprint"].get("entities"), Some(&Value::Array(vec![])));
    }

    #[test]
    fn test_error_discrimination() {
        let encoding = decode("0eJy!VUdtKx").unwrap_err();
        assert_eq!(encoding.kind(), ErrorKind::Encoding);

        let compression = decode(&format!("0{}", encoder::encode_base64(b"not deflate"))).unwrap_err();
        assert_eq!(compression.kind(), ErrorKind::Compression);

        let truncated = &SAMPLE[..SAMPLE.len() - 40];
        let truncated = format!("{}{}", truncated, "=".repeat((4 - (truncated.len() - 1) % 4) % 4));
        assert_eq!(decode(&truncated).unwrap_err().kind(), ErrorKind::Compression);

        let payload = encoder::encode_payload(b"{\"blueprint\": ", '0', 6).unwrap();
        let format = decode(&payload).unwrap_err();
        assert!(matches!(format, Error::MalformedDocument(_)));
        assert_eq!(format.kind(), ErrorKind::Format);

        assert_eq!(decode("").unwrap_err().kind(), ErrorKind::Encoding);
    }

    #[test]
    fn test_whitespace_ignored() {
        let padded = format!("  {}\n", SAMPLE);
        assert_eq!(decode(&padded).unwrap(), decode(SAMPLE).unwrap());
    }
}
