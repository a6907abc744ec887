//! Lookup table rows resolved by name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which name-keyed lookup table a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    Voice,
    ResponseCategory,
}

impl LookupKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Voice => "voice",
            Self::ResponseCategory => "response category",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `(id, name)` row from the `voices` or `response_categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: i64,
    pub name: String,
}

impl LookupEntry {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
