use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::FlagId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlagError {
    #[error("flag name must not be empty")]
    EmptyName,
}

/// One row of the flag table: a stable id, a display name (also the answer
/// key shown to the player), and an opaque reference to a bundled image.
///
/// Records are created by the seeding process and never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRecord {
    id: FlagId,
    name: String,
    image_ref: String,
}

impl FlagRecord {
    /// Create a record, validating the display name.
    ///
    /// # Errors
    ///
    /// Returns `FlagError::EmptyName` if the name is empty or whitespace.
    pub fn new(
        id: FlagId,
        name: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Result<Self, FlagError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FlagError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            image_ref: image_ref.into(),
        })
    }

    /// Rehydrate a record from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `FlagError::EmptyName` if the persisted name is empty.
    pub fn from_persisted(
        id: FlagId,
        name: String,
        image_ref: String,
    ) -> Result<Self, FlagError> {
        Self::new(id, name, image_ref)
    }

    #[must_use]
    pub fn id(&self) -> FlagId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }
}
