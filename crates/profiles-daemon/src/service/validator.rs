//! Permission validation

use profiles_types::{Parameters, ProfileName, ValidationResult, Verdict};
use std::collections::BTreeMap;

/// Evaluate each requested action against a profile's parameters
///
/// Present and `true` is allowed, present and `false` is denied, anything
/// else is undefined. Duplicate actions collapse onto one key.
pub fn evaluate(parameters: &Parameters, actions: &[String]) -> BTreeMap<String, Verdict> {
    actions
        .iter()
        .map(|action| {
            let verdict = Verdict::from_parameter(parameters.get(action).copied());
            (action.clone(), verdict)
        })
        .collect()
}

/// Build the full validation result for one profile
pub fn validate(
    profile_name: &ProfileName,
    parameters: &Parameters,
    actions: &[String],
) -> ValidationResult {
    ValidationResult {
        profile_name: profile_name.clone(),
        results: evaluate(parameters, actions),
    }
}
