// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for occlusion passes
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during an occlusion pass
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Geometry error: {0}")]
    Geometry(#[from] wireframe_geometry::Error),

    /// The pass was stopped through its cancel token
    #[error("Occlusion cancelled after {processed} of {total} segments")]
    Cancelled { processed: usize, total: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
