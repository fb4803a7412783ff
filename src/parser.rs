// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/parser.rs - JSON layer for decoded Factorio blueprints.
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
 * # `parser` Module
 *
 * This module converts between the JSON text carried inside a blueprint
 * string and the [Value] document tree, and loads and saves documents as
 * indented JSON files.
 *
 * ## Usage Example
 *
 * ```no_run
 * use factorio_blueprint::decoder::DecodedBlueprintString;
 * use factorio_blueprint::parser::{ParsedBlueprint, save_to_file};
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     let blueprint = std::fs::read_to_string("blueprint.txt")?;
 *
 *     // Decode the string
 *     let decoded = DecodedBlueprintString::new(&blueprint)?;
 *
 *     // Parse the decoded JSON
 *     let parsed = ParsedBlueprint::from_decoded(&decoded)?;
 *
 *     // Save it for editing
 *     save_to_file("blueprint.json", &parsed.document)?;
 *
 *     Ok(())
 * }
 * ```
 */

use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use serde::Serialize;
use serde::ser::Error as _;
use serde_json::Value;
use serde_json::ser::{CompactFormatter, Formatter, Serializer};

use crate::decoder::DecodedBlueprintString;
use crate::error::{Error, Result};

/// How JSON text is laid out when a document is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonLayout {
    /// No whitespace at all, as the game itself exports blueprints.
    #[default]
    Compact,
    /// `", "` and `": "` separators with non-ASCII characters escaped as
    /// `\uXXXX`, as written by Python's `json.dumps` with default settings.
    Spaced,
}

/// Formatter for [JsonLayout::Spaced].
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\u{7f}' {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Parses UTF-8 JSON text into a document.
///
/// Object keys keep their order. A repeated key keeps its first position and
/// takes its last value.
pub fn parse_document(text: &[u8]) -> Result<Value> {
    serde_json::from_slice(text).map_err(Error::MalformedDocument)
}

fn serialize_with<F: Formatter>(document: &Value, formatter: F) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    document
        .serialize(&mut serializer)
        .map_err(Error::UnserializableDocument)?;
    Ok(buffer)
}

/// Serializes a document to JSON bytes in the given layout.
pub fn to_json_vec(document: &Value, layout: JsonLayout) -> Result<Vec<u8>> {
    match layout {
        JsonLayout::Compact => serialize_with(document, CompactFormatter),
        JsonLayout::Spaced => serialize_with(document, SpacedFormatter),
    }
}

/// Serializes a document to a JSON string in the given layout.
pub fn to_json_string(document: &Value, layout: JsonLayout) -> Result<String> {
    let bytes = to_json_vec(document, layout)?;
    String::from_utf8(bytes)
        .map_err(|error| Error::UnserializableDocument(serde_json::Error::custom(error)))
}

/// Serializes a document as JSON indented by two spaces.
pub fn to_json_pretty(document: &Value) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(Error::UnserializableDocument)
}

/// Loads a document from a JSON file.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let text = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded {} bytes from {}", text.len(), path.display());
    parse_document(&text)
}

/// Saves a document to a file as indented JSON.
pub fn save_to_file<P: AsRef<Path>>(path: P, document: &Value) -> Result<()> {
    let path = path.as_ref();
    let mut text = to_json_pretty(document)?;
    text.push('\n');
    fs::write(path, &text).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("saved {} bytes to {}", text.len(), path.display());
    Ok(())
}

/// A decoded blueprint string with its JSON payload parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBlueprint {
    /// The leading format-version character.
    pub version_tag: char,
    /// The blueprint document.
    pub document: Value,
}

impl ParsedBlueprint {
    /// Parses the payload of a decoded blueprint string.
    ///
    /// # Arguments
    ///
    /// * `decoded` - The decoded blueprint string.
    ///
    /// # Returns
    ///
    /// A `Result` containing the parsed `ParsedBlueprint` or an error.
    pub fn from_decoded(decoded: &DecodedBlueprintString) -> Result<Self> {
        let document = parse_document(&decoded.payload)?;

        Ok(Self {
            version_tag: decoded.version_tag,
            document,
        })
    }
}
