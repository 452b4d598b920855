pub mod categories;
pub mod check;
pub mod checks;
pub mod registry;
pub mod runner;

pub use check::{CheckContext, CheckOptions, ContractCheck};
pub use registry::{default_checks, CheckName, CHECK_REGISTRY};
pub use runner::SuiteRunner;
