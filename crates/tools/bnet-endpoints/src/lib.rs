//! Resolve a Battle.net provider from flags and settings and describe its endpoints.

pub mod cli;
pub mod error;
pub mod report;
