// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/error.rs - Error types for the blueprint string pipeline.
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

use std::path::PathBuf;

use thiserror::Error;

/// Broad category of an [Error], one per pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text-safe (base64) layer rejected the input.
    Encoding,
    /// The zlib stream was corrupt, truncated, or could not be produced.
    Compression,
    /// The JSON text was malformed, or the document cannot be written as JSON.
    Format,
    /// Reading or writing a document file failed.
    Io,
}

/// Errors produced while decoding, encoding, loading, or saving blueprints.
#[derive(Debug, Error)]
pub enum Error {
    #[error("blueprint string is empty")]
    EmptyString,

    #[error("version tag {0:?} is whitespace and would be lost on decode")]
    InvalidVersionTag(char),

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("corrupt zlib stream: {0}")]
    CorruptStream(#[from] flate2::DecompressError),

    #[error("zlib stream truncated after {consumed} of {len} bytes without an end marker")]
    TruncatedStream { consumed: usize, len: usize },

    #[error("zlib stream inflates past the {max}-byte payload limit")]
    PayloadTooLarge { max: usize },

    #[error("zlib compression failed: {0}")]
    CompressionFailed(#[source] std::io::Error),

    #[error("malformed JSON document: {0}")]
    MalformedDocument(#[source] serde_json::Error),

    #[error("document cannot be written as JSON: {0}")]
    UnserializableDocument(#[source] serde_json::Error),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns the pipeline stage this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyString | Error::InvalidVersionTag(_) | Error::InvalidBase64(_) => {
                ErrorKind::Encoding
            }
            Error::CorruptStream(_)
            | Error::TruncatedStream { .. }
            | Error::PayloadTooLarge { .. }
            | Error::CompressionFailed(_) => ErrorKind::Compression,
            Error::MalformedDocument(_) | Error::UnserializableDocument(_) => ErrorKind::Format,
            Error::Io { .. } => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
