//! API request handlers

mod cache;
mod health;
mod profiles;

pub use cache::*;
pub use health::*;
pub use profiles::*;
