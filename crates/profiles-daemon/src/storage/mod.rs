//! Storage layer for profiles-daemon
//!
//! Holds the authoritative set of profiles.

mod memory;
mod traits;

pub use memory::InMemoryProfileStore;
pub use traits::{ParameterRewrite, ProfileStore};

#[cfg(test)]
pub(crate) mod testing;
