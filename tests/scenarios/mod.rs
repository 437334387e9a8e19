//! Scenario tests against the in-memory SiteWise service
//!
//! - Asset hierarchy walker
//! - Model reference tracer
//! - Model search
//! - Command-line entry points

pub mod fixtures;
pub mod test_cli;
pub mod test_hierarchy;
pub mod test_search;
