//! Permission verdicts

use crate::ProfileName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of checking one action against a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Parameter present and `true`
    Allowed,
    /// Parameter present and `false`
    Denied,
    /// No parameter with that name
    Undefined,
}

impl Verdict {
    pub fn from_parameter(value: Option<bool>) -> Self {
        match value {
            Some(true) => Verdict::Allowed,
            Some(false) => Verdict::Denied,
            None => Verdict::Undefined,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Allowed => "Allowed",
            Verdict::Denied => "Denied",
            Verdict::Undefined => "Undefined",
        };
        f.write_str(s)
    }
}

/// Verdicts for every requested action of one profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub profile_name: ProfileName,
    pub results: BTreeMap<String, Verdict>,
}
