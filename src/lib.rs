// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod cache;
pub mod config;
pub mod mlb;
pub mod pipeline;
pub mod report;
pub mod resolve;
pub mod schedule;
pub mod stats;
