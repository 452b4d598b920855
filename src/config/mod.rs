pub mod env;
pub mod redact;

pub use env::{ConfigOverrides, ProbeConfig, DEFAULT_TIMEOUT_SECS};
