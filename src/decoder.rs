// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/decoder.rs - Decoder for Factorio blueprint strings.
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

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::{Decompress, FlushDecompress, Status};
use log::{debug, trace};

use crate::error::{Error, Result};

const INFLATE_CHUNK: usize = 16 * 1024;

/// Largest inflated payload accepted by [decompress].
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024 * 1024;

/// Splits a blueprint string into its version tag and base64 body.
///
/// Surrounding whitespace is ignored.
pub fn split_version_tag(blueprint: &str) -> Result<(char, &str)> {
    let blueprint = blueprint.trim();
    let mut chars = blueprint.chars();
    let version_tag = chars.next().ok_or(Error::EmptyString)?;
    Ok((version_tag, chars.as_str()))
}

/// Decodes padded, standard-alphabet base64.
pub fn decode_base64(body: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(body)?)
}

/// Inflates a zlib stream of at most [MAX_PAYLOAD_SIZE] bytes.
///
/// A stream that runs out of input before its end marker is reported as
/// [Error::TruncatedStream]. Bytes after the end marker are ignored.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_limit(data, MAX_PAYLOAD_SIZE)
}

/// Inflates a zlib stream, failing with [Error::PayloadTooLarge] as soon as
/// the output would grow past `max` bytes.
pub fn decompress_with_limit(data: &[u8], max: usize) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut buffer = Vec::with_capacity(data.len().saturating_mul(4).max(INFLATE_CHUNK).min(max));

    loop {
        if buffer.len() == buffer.capacity() {
            if buffer.len() >= max {
                return Err(Error::PayloadTooLarge { max });
            }
            // Double up to the limit, never past it.
            let additional = buffer.len().max(INFLATE_CHUNK).min(max - buffer.len());
            buffer.reserve_exact(additional);
        }

        let consumed_before = inflater.total_in() as usize;
        let produced_before = inflater.total_out();
        let status =
            inflater.decompress_vec(&data[consumed_before..], &mut buffer, FlushDecompress::None)?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let consumed = inflater.total_in() as usize;
                let exhausted = consumed == data.len();
                let stalled = consumed == consumed_before && inflater.total_out() == produced_before;
                if buffer.len() < buffer.capacity() && (exhausted || stalled) {
                    return Err(Error::TruncatedStream {
                        consumed,
                        len: data.len(),
                    });
                }
            }
        }
    }

    let consumed = inflater.total_in() as usize;
    if consumed < data.len() {
        debug!("ignoring {} bytes after the zlib end marker", data.len() - consumed);
    }

    Ok(buffer)
}

/// A blueprint string with its version tag split off and its payload
/// decoded and decompressed, but not yet parsed.
#[derive(Debug)]
pub struct DecodedBlueprintString {
    /// The leading format-version character.
    pub version_tag: char,
    /// The inflated JSON text, as raw bytes.
    pub payload: Vec<u8>,
}

impl DecodedBlueprintString {
    pub fn new(blueprint: &str) -> Result<Self> {
        let (version_tag, body) = split_version_tag(blueprint)?;
        trace!("version tag {:?}", version_tag);

        let compressed = decode_base64(body)?;
        debug!(
            "decoded {} base64 characters into {} compressed bytes",
            body.len(),
            compressed.len()
        );

        let payload = decompress(&compressed)?;
        debug!(
            "inflated {} compressed bytes into {} bytes of JSON",
            compressed.len(),
            payload.len()
        );

        Ok(Self {
            version_tag,
            payload,
        })
    }
}
