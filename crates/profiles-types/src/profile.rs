//! Profiles and their cache projection

use crate::ProfileName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named boolean permission flags (action name to allowed/denied)
pub type Parameters = BTreeMap<String, bool>;

/// A named set of permission parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique, case-insensitive name
    #[serde(rename = "profileName")]
    pub name: ProfileName,

    /// Permission flags keyed by action
    #[serde(default)]
    pub parameters: Parameters,
}

impl Profile {
    pub fn new(name: impl Into<ProfileName>, parameters: Parameters) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// Returns the first parameter key that is empty or whitespace-only
    pub fn blank_parameter_key(&self) -> Option<&str> {
        self.parameters
            .keys()
            .map(String::as_str)
            .find(|key| key.trim().is_empty())
    }
}

/// Cache-side projection of a profile
///
/// Structurally identical to a [`Profile`]'s payload. It is a separate type
/// because the cache is keyed and refreshed independently of the store and
/// may hold values the store no longer has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileParameter {
    pub profile_name: ProfileName,

    #[serde(default)]
    pub parameters: Parameters,
}

impl ProfileParameter {
    pub fn new(profile_name: impl Into<ProfileName>, parameters: Parameters) -> Self {
        Self {
            profile_name: profile_name.into(),
            parameters,
        }
    }
}

impl From<Profile> for ProfileParameter {
    fn from(profile: Profile) -> Self {
        Self {
            profile_name: profile.name,
            parameters: profile.parameters,
        }
    }
}

impl From<ProfileParameter> for Profile {
    fn from(parameter: ProfileParameter) -> Self {
        Self {
            name: parameter.profile_name,
            parameters: parameter.parameters,
        }
    }
}
