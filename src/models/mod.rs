pub mod outcome;
pub mod report;

pub use outcome::{CheckOutcome, Verdict};
pub use report::{CheckRecord, RunReport};
