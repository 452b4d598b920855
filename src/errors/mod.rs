pub mod types;
pub mod classification;

pub use types::ProbeError;
pub use classification::ErrorClassification;
