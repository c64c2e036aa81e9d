// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the error types surfaced by the overlay pipeline's collaborators.
//!
//! None of these are fatal. Configuration errors disable tracking for the
//! session, media errors keep the overlay idle until the next detection.

use thiserror::Error;

/// The reference image could not be read or decoded.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    /// The asset source could not provide the bytes.
    #[error("failed to read asset '{name}'")]
    Read {
        /// The asset name that was requested.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The bytes could not be decoded into an image.
    #[error("failed to decode image '{name}'")]
    Decode {
        /// The asset name that was requested.
        name: String,
        /// The underlying decoder error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// The tracking engine rejected part of the session configuration.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The image database could not be built or attached.
    #[error("image database rejected: {0}")]
    DatabaseRejected(String),
    /// The engine session is not available.
    #[error("tracking session unavailable")]
    SessionUnavailable,
}

/// The media subsystem could not provide a stream.
#[derive(Debug, Error)]
pub enum MediaError {
    /// No media asset exists under that name.
    #[error("media asset '{0}' not found")]
    NotFound(String),
    /// The asset exists but could not be opened for decoding.
    #[error("failed to open media asset '{name}': {reason}")]
    OpenFailed {
        /// The asset name that was requested.
        name: String,
        /// Backend-specific details.
        reason: String,
    },
}
