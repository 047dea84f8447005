//! Common type definitions and newtype wrappers for domain modeling.

use crate::error::DropError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest name Discord accepts for an application command.
pub const MAX_SET_NAME_LEN: usize = 32;

/// Names that can never become a set because they are taken by admin
/// commands or by the per-set `used/` directory.
pub const RESERVED_NAMES: &[&str] = &["add", "upload", "delete", "purge", "purge_used", "stats", "used"];

/// A Discord guild ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildId(pub u64);

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a code set.
///
/// The same string is used as a directory under the storage root and as a
/// Discord command name, so it is restricted to lowercase ASCII letters,
/// digits, `-` and `_`, at most [`MAX_SET_NAME_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SetName(String);

impl SetName {
    /// Validates and normalizes raw user input into a set name.
    pub fn parse(raw: &str) -> Result<Self, DropError> {
        let name = raw.trim().to_ascii_lowercase();

        if name.is_empty() {
            return Err(DropError::invalid_field("Set name cannot be empty", "name"));
        }
        if name.chars().count() > MAX_SET_NAME_LEN {
            return Err(DropError::invalid_field(
                format!("Set name must be at most {MAX_SET_NAME_LEN} characters"),
                "name",
            ));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(DropError::invalid_field(
                "Set name may only contain letters, digits, `-` and `_`",
                "name",
            ));
        }
        if RESERVED_NAMES.contains(&name.as_str()) {
            return Err(DropError::invalid_field(
                format!("`{name}` is a reserved name"),
                "name",
            ));
        }

        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SetName {
    type Err = DropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SetName {
    type Error = DropError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SetName> for String {
    fn from(value: SetName) -> Self {
        value.0
    }
}
