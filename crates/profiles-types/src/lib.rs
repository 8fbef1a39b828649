//! Profiles Types - Core types for permission profiles
//!
//! A profile is a named set of boolean permission flags. This crate holds
//! the data model shared by the store, the cache and the REST surface.
//!
//! ## Key Concepts
//!
//! - **ProfileName**: Case-insensitive profile identity
//! - **Profile**: Authoritative entity owned by the store
//! - **ProfileParameter**: Cache projection of a profile's parameters
//! - **Verdict**: Outcome of checking one action against a profile
//! - **ValidationResult**: Per-request map of action to verdict

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod name;
pub mod profile;
pub mod validation;

// Re-export main types
pub use name::ProfileName;
pub use profile::{Parameters, Profile, ProfileParameter};
pub use validation::{ValidationResult, Verdict};
