// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Everything that can go wrong reading, writing, or building a description.
#[derive(Error, Debug)]
pub enum DescriptionError {
    /// Malformed JSON, or JSON that does not match the description schema.
    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a description file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The `version` field names a format this crate does not understand.
    #[error("unsupported description version {0:?}, expected 1.x")]
    UnsupportedVersion(String),

    /// Two elements share the same non-empty id.
    #[error("element id {0:?} is used more than once")]
    DuplicateId(String),

    /// An element (or the description itself) declares a negative width or height.
    #[error("element {id:?} has a negative size ({width}x{height})")]
    NegativeSize {
        /// Id of the offending element; `root` for the description itself.
        id: String,
        /// Declared width.
        width: i32,
        /// Declared height.
        height: i32,
    },

    /// A grid track string is not `auto`, `*`, `<weight>*`, or `<pixels>`.
    #[error("invalid grid track size {0:?}")]
    InvalidTrack(String),
}

/// Result alias for description operations.
pub type Result<T, E = DescriptionError> = core::result::Result<T, E>;
