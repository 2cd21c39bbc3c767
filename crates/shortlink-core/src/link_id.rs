use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Length of the ids produced by the default generator policy.
pub const DEFAULT_LENGTH: usize = 8;

/// Upper bound accepted by [`LinkId::new`].
pub const MAX_LENGTH: usize = 64;

/// The identifier of a [`Link`](crate::Link).
///
/// Serves both as the primary key in the repository and as the public
/// short-path token. Ids consist only of ASCII letters and digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    /// Creates a new `LinkId` after validating the input.
    ///
    /// Valid ids are 1-64 characters and contain only `[A-Za-z0-9]`.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Creates a `LinkId` without validation.
    ///
    /// Use this only for ids produced by trusted internal sources
    /// (the generator, or rows read back from the repository).
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(id: &str) -> Result<(), CoreError> {
        if id.is_empty() {
            return Err(CoreError::InvalidLinkId("id cannot be empty".to_string()));
        }

        if id.len() > MAX_LENGTH {
            return Err(CoreError::InvalidLinkId(format!(
                "length must be at most {}, got {}",
                MAX_LENGTH,
                id.len()
            )));
        }

        if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidLinkId(format!(
                "must contain only ASCII letters and digits: '{}'",
                id
            )));
        }

        Ok(())
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LinkId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for LinkId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LinkId::new(s).map_err(serde::de::Error::custom)
    }
}
