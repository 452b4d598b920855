pub mod formatter;

pub use formatter::{format_report_json, format_report_text};
