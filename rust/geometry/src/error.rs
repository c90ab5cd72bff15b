// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing geometric entities
///
/// Predicates never return these: by the time containment, intersection or
/// occlusion run, every entity has been validated at construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Not enough points to build a ring, face or edge
    #[error("Degenerate construction: {0}")]
    DegenerateConstruction(String),

    /// Normalizing a zero vector, a normal from parallel edges, or a zero divisor
    #[error("Undefined operation: {0}")]
    UndefinedOperation(String),
}

impl Error {
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateConstruction(message.into())
    }

    pub fn undefined(message: impl Into<String>) -> Self {
        Self::UndefinedOperation(message.into())
    }
}
