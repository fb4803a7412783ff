// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/interpreter.rs - Summaries of decoded Factorio blueprints.
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
 * # `interpreter` Module
 *
 * This module reads the handful of well-known fields out of a decoded
 * blueprint document to produce a human-readable summary. Every field is
 * optional: a missing or oddly typed field shows up as `None` rather than
 * as an error.
 *
 * ## Usage Example
 *
 * ```no_run
 * use factorio_blueprint::decode;
 * use factorio_blueprint::interpreter::BlueprintSummary;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     let blueprint = std::fs::read_to_string("blueprint.txt")?;
 *
 *     // Decode the string
 *     let (document, _version_tag) = decode(&blueprint)?;
 *
 *     // Summarize the document
 *     let summary = BlueprintSummary::from_document(&document);
 *     print!("{}", summary);
 *
 *     Ok(())
 * }
 * ```
 */

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Entities without a `name` field are counted under this name.
pub const UNKNOWN_ENTITY: &str = "unknown";

/// A game version packed into 64 bits as four 16-bit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub build: u16,
}

impl GameVersion {
    pub fn from_packed(packed: u64) -> Self {
        Self {
            major: (packed >> 48) as u16,
            minor: (packed >> 32) as u16,
            patch: (packed >> 16) as u16,
            build: packed as u16,
        }
    }

    pub fn to_packed(&self) -> u64 {
        (u64::from(self.major) << 48)
            | (u64::from(self.minor) << 32)
            | (u64::from(self.patch) << 16)
            | u64::from(self.build)
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.patch, self.build)
    }
}

/// What a decoded blueprint document contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlueprintSummary {
    /// A single blueprint.
    Blueprint {
        label: Option<String>,
        /// Number of entities, or `None` if there is no `entities` array.
        entity_count: Option<usize>,
        /// Entity counts by name, sorted by name.
        entities: BTreeMap<String, usize>,
        tile_count: Option<usize>,
        version: Option<GameVersion>,
    },
    /// A blueprint book.
    Book {
        label: Option<String>,
        blueprint_count: Option<usize>,
    },
    /// Anything else, such as an upgrade or deconstruction planner.
    Other,
}

impl BlueprintSummary {
    /// Summarizes a decoded document.
    pub fn from_document(document: &Value) -> Self {
        if let Some(blueprint) = document.get("blueprint") {
            let label = blueprint["label"].as_str().map(String::from);

            let entity_list = blueprint["entities"].as_array();
            let mut entities = BTreeMap::new();
            for entity in entity_list.into_iter().flatten() {
                let name = entity["name"].as_str().unwrap_or(UNKNOWN_ENTITY);
                *entities.entry(name.to_string()).or_insert(0) += 1;
            }

            Self::Blueprint {
                label,
                entity_count: entity_list.map(Vec::len),
                entities,
                tile_count: blueprint["tiles"].as_array().map(Vec::len),
                version: blueprint["version"].as_u64().map(GameVersion::from_packed),
            }
        } else if let Some(book) = document.get("blueprint_book") {
            Self::Book {
                label: book["label"].as_str().map(String::from),
                blueprint_count: book["blueprints"].as_array().map(Vec::len),
            }
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for BlueprintSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blueprint {
                label,
                entity_count,
                entities,
                tile_count,
                version,
            } => {
                writeln!(f, "Type: Blueprint")?;
                if let Some(label) = label {
                    writeln!(f, "Label: {}", label)?;
                }
                if let Some(count) = entity_count {
                    writeln!(f, "Entities: {}", count)?;
                    for (name, count) in entities {
                        writeln!(f, "  - {}: {}", name, count)?;
                    }
                }
                if let Some(count) = tile_count {
                    writeln!(f, "Tiles: {}", count)?;
                }
                if let Some(version) = version {
                    writeln!(f, "Version: {} ({})", version, version.to_packed())?;
                }
                Ok(())
            }
            Self::Book {
                label,
                blueprint_count,
            } => {
                writeln!(f, "Type: Blueprint Book")?;
                if let Some(label) = label {
                    writeln!(f, "Label: {}", label)?;
                }
                if let Some(count) = blueprint_count {
                    writeln!(f, "Contains {} blueprints", count)?;
                }
                Ok(())
            }
            Self::Other => writeln!(f, "Type: Unknown"),
        }
    }
}
