use async_trait::async_trait;
use serde_json::Value;
use super::value_kind;
use crate::contract::categories::{DEFAULT_SECTION, ERROR_SECTION};
use crate::contract::check::{require_body, require_snapshot, CheckContext, ContractCheck};
use crate::contract::registry::CheckName;
use crate::models::CheckOutcome;

/// `count` must agree with the length of a concrete `items` array.
pub struct CountConsistencyCheck {
    section: String,
}

impl CountConsistencyCheck {
    pub fn default_section() -> Self {
        Self::for_section(DEFAULT_SECTION)
    }

    pub fn for_section(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
        }
    }
}

#[async_trait]
impl ContractCheck for CountConsistencyCheck {
    fn name(&self) -> CheckName {
        CheckName::CountConsistency
    }

    async fn run(&self, cx: &CheckContext) -> CheckOutcome {
        let snapshot = match require_snapshot(cx).await {
            Ok(s) => s,
            Err(outcome) => return outcome,
        };
        let body = match require_body(&snapshot) {
            Ok(b) => b,
            Err(outcome) => return outcome,
        };
        count_consistency_outcome(&self.section, body)
    }
}

pub(crate) fn count_consistency_outcome(section_name: &str, body: &Value) -> CheckOutcome {
    let section = match body.get(section_name) {
        Some(s) if s.is_object() => s,
        Some(s) => {
            return CheckOutcome::failed(format!(
                "expected section '{}' to be an object, got {}",
                section_name,
                value_kind(s)
            ));
        }
        None => return CheckOutcome::failed(format!("section '{}' is missing", section_name)),
    };

    let items = match section.get("items") {
        None | Some(Value::Null) => {
            // Only an overview count was returned, nothing to compare against
            return CheckOutcome::passed(format!(
                "section '{}' carries no item list, count not comparable",
                section_name
            ));
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            return CheckOutcome::failed(format!(
                "expected '{}.items' to be an array or null, got {}",
                section_name,
                value_kind(other)
            ));
        }
    };

    let count = match section.get("count").and_then(Value::as_i64) {
        Some(count) => count,
        None => {
            return CheckOutcome::failed(format!(
                "section '{}' has no integer count to compare against",
                section_name
            ));
        }
    };

    if count == items.len() as i64 {
        CheckOutcome::passed(format!(
            "count {} matches {} listed items",
            count,
            items.len()
        ))
    } else {
        CheckOutcome::failed(format!(
            "count {} does not match {} listed items",
            count,
            items.len()
        ))
    }
}

/// When a category embeds an `error` string it must carry the expected marker.
pub struct EmbeddedErrorCheck;

#[async_trait]
impl ContractCheck for EmbeddedErrorCheck {
    fn name(&self) -> CheckName {
        CheckName::EmbeddedErrorShape
    }

    async fn run(&self, cx: &CheckContext) -> CheckOutcome {
        let snapshot = match require_snapshot(cx).await {
            Ok(s) => s,
            Err(outcome) => return outcome,
        };
        let body = match require_body(&snapshot) {
            Ok(b) => b,
            Err(outcome) => return outcome,
        };
        embedded_error_outcome(ERROR_SECTION, body, &cx.options().error_marker)
    }
}

pub(crate) fn embedded_error_outcome(section_name: &str, body: &Value, marker: &str) -> CheckOutcome {
    let error = body.get(section_name).and_then(|section| section.get("error"));

    match error {
        None => CheckOutcome::skipped(format!(
            "section '{}' carries no embedded error",
            section_name
        )),
        Some(Value::String(message)) => {
            if message.contains(marker) {
                CheckOutcome::passed(format!(
                    "embedded error in '{}' carries the expected marker",
                    section_name
                ))
            } else {
                CheckOutcome::failed(format!(
                    "embedded error in '{}' does not contain '{}': {}",
                    section_name, marker, message
                ))
            }
        }
        Some(other) => CheckOutcome::failed(format!(
            "'{}.error' must be a string, got {}",
            section_name,
            value_kind(other)
        )),
    }
}
