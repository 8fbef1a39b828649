//! Profile services
//!
//! - [`ProfileService`]: validating CRUD boundary over the store
//! - [`ProfileCacheService`]: cache-first access that falls back to the store
//! - [`validator`]: the single verdict algorithm both of them use

mod cache;
mod profiles;
pub mod validator;

pub use cache::ProfileCacheService;
pub use profiles::{ProfileService, MAX_PROFILE_NAME_LEN};
