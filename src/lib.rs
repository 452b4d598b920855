//! Conformance probe for cloud cost optimization overview APIs.
//!
//! Fetches one organization's optimizations overview and runs a fixed
//! suite of shape and consistency checks against the response.

pub mod cli;
pub mod client;
pub mod config;
pub mod contract;
pub mod errors;
pub mod models;
pub mod reporting;
pub mod utils;
