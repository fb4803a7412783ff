// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/encoder.rs - Encoder for Factorio blueprint strings.
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

use std::io::prelude::*;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use log::{debug, trace};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::parser::{JsonLayout, to_json_vec};

/// zlib's own default level.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Options for encoding blueprint strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Whitespace layout of the embedded JSON.
    pub layout: JsonLayout,
    /// zlib compression level, 0 through 9. Larger values are clamped to 9.
    pub level: u32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            layout: JsonLayout::Compact,
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reproduce strings written by the Python reference tool.
    pub fn spaced() -> Self {
        Self {
            layout: JsonLayout::Spaced,
            ..Self::default()
        }
    }

    pub fn with_layout(mut self, layout: JsonLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }
}

/// Deflates `data` into a zlib stream.
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(data.len() / 4 + 64),
        Compression::new(level.min(9)),
    );
    encoder.write_all(data).map_err(Error::CompressionFailed)?;
    encoder.finish().map_err(Error::CompressionFailed)
}

/// Encodes bytes as padded, standard-alphabet base64.
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Builds a blueprint string from already-serialized JSON bytes.
///
/// Whitespace tags are rejected since decoding trims surrounding whitespace.
pub fn encode_payload(payload: &[u8], version_tag: char, level: u32) -> Result<String> {
    if version_tag.is_whitespace() {
        return Err(Error::InvalidVersionTag(version_tag));
    }

    let compressed = compress(payload, level)?;
    debug!(
        "deflated {} bytes of JSON into {} compressed bytes",
        payload.len(),
        compressed.len()
    );

    let mut blueprint = String::with_capacity(1 + compressed.len().div_ceil(3) * 4);
    blueprint.push(version_tag);
    STANDARD.encode_string(&compressed, &mut blueprint);
    Ok(blueprint)
}

/// Serializes, compresses, and base64-encodes a document, then prefixes the
/// version tag.
pub fn encode_document(
    document: &Value,
    version_tag: char,
    options: EncodeOptions,
) -> Result<String> {
    trace!("encoding with version tag {:?} and {:?}", version_tag, options);
    let payload = to_json_vec(document, options.layout)?;
    encode_payload(&payload, version_tag, options.level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{DecodedBlueprintString, decompress};
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_compress_levels() {
        let data = b"{\"entities\": []}".repeat(64);
        for level in [0, 1, 6, 9, 42] {
            let compressed = compress(&data, level).unwrap();
            assert_eq!(compressed[0], 0x78, "level {level}");
            assert_eq!(decompress(&compressed).unwrap(), data);
        }
        assert!(compress(&data, 9).unwrap().len() < compress(&data, 0).unwrap().len());
    }

    #[test]
    fn test_deterministic() {
        let document = json!({"item": "blueprint"});
        let first = encode_document(&document, '0', EncodeOptions::new()).unwrap();
        let second = encode_document(&document, '0', EncodeOptions::new()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_base64_padding() {
        assert_eq!(encode_base64(b"a"), "YQ==");
        assert_eq!(encode_base64(b"ab"), "YWI=");
        assert_eq!(encode_base64(b"abc"), "YWJj");
        assert_eq!(encode_base64(b""), "");
    }

    #[test]
    fn test_encode_payload() {
        let blueprint = encode_payload(b"{\"a\": 1}", '0', DEFAULT_COMPRESSION_LEVEL).unwrap();
        assert!(blueprint.starts_with("0eJ"));
        assert!(blueprint.is_ascii());
        assert_eq!((blueprint.len() - 1) % 4, 0);

        let decoded = DecodedBlueprintString::new(&blueprint).unwrap();
        assert_eq!(decoded.version_tag, '0');
        assert_eq!(decoded.payload, b"{\"a\": 1}");
    }

    #[test]
    fn test_whitespace_tag_rejected() {
        for tag in [' ', '\n', '\u{3000}'] {
            let error = encode_payload(b"{}", tag, DEFAULT_COMPRESSION_LEVEL).unwrap_err();
            assert!(matches!(error, Error::InvalidVersionTag(t) if t == tag));
            assert_eq!(error.kind(), ErrorKind::Encoding);
        }
    }

    #[test]
    fn test_layouts() {
        let document = json!({"a": 1, "b": [true, false]});

        let compact = encode_document(&document, '0', EncodeOptions::new()).unwrap();
        let decoded = DecodedBlueprintString::new(&compact).unwrap();
        assert_eq!(decoded.payload, b"{\"a\":1,\"b\":[true,false]}");

        let spaced = encode_document(&document, '0', EncodeOptions::spaced()).unwrap();
        let decoded = DecodedBlueprintString::new(&spaced).unwrap();
        assert_eq!(decoded.payload, b"{\"a\": 1, \"b\": [true, false]}");
    }
}
