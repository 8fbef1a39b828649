//! Background parameter updater

mod job;

pub use job::{ProfileUpdater, TickReport, ValuePolicy};
