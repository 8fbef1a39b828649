//! Case-insensitive profile identifiers
//!
//! Profile names keep the spelling they were created with, but two names
//! that differ only in case refer to the same profile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Name of a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileName(String);

impl ProfileName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for empty or whitespace-only names
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Case-insensitive comparison against a raw name
    pub fn matches(&self, other: &str) -> bool {
        fold(&self.0) == fold(other)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}

impl PartialEq for ProfileName {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl Eq for ProfileName {}

impl Hash for ProfileName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fold(&self.0).hash(state);
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProfileName {
    fn from(value: String) -> Self {
        Self(value)
    }
}
