use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use super::{is_integer, value_kind};
use crate::contract::categories::{
    CloudAccountType, DEFAULT_SECTION, DETECTED_AT_FUTURE_SLACK_SECS, DETECTED_AT_MIN,
    EXPECTED_CATEGORIES,
};
use crate::contract::check::{require_body, require_snapshot, CheckContext, ContractCheck};
use crate::contract::registry::CheckName;
use crate::models::CheckOutcome;

/// The body must be an object carrying every category key.
pub struct TopLevelShapeCheck;

#[async_trait]
impl ContractCheck for TopLevelShapeCheck {
    fn name(&self) -> CheckName {
        CheckName::TopLevelShape
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
        top_level_outcome(body)
    }
}

pub(crate) fn top_level_outcome(body: &Value) -> CheckOutcome {
    if !body.is_object() {
        return CheckOutcome::failed(format!(
            "expected the report body to be a JSON object, got {}",
            value_kind(body)
        ));
    }

    let missing: Vec<&str> = EXPECTED_CATEGORIES
        .iter()
        .copied()
        .filter(|key| body.get(key).is_none())
        .collect();

    if missing.is_empty() {
        CheckOutcome::passed(format!(
            "all {} expected categories present",
            EXPECTED_CATEGORIES.len()
        ))
    } else {
        CheckOutcome::failed(format!("missing categories: {}", missing.join(", ")))
    }
}

/// A category section must carry typed count/saving/options/items fields.
pub struct SectionShapeCheck {
    section: String,
}

impl SectionShapeCheck {
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
impl ContractCheck for SectionShapeCheck {
    fn name(&self) -> CheckName {
        CheckName::SectionShape
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
        section_shape_outcome(&self.section, body)
    }
}

pub(crate) fn section_shape_outcome(section_name: &str, body: &Value) -> CheckOutcome {
    let section = match body.get(section_name) {
        Some(s) => s,
        None => return CheckOutcome::failed(format!("section '{}' is missing", section_name)),
    };
    if !section.is_object() {
        return CheckOutcome::failed(format!(
            "expected section '{}' to be an object, got {}",
            section_name,
            value_kind(section)
        ));
    }

    let mut problems = Vec::new();

    match section.get("count") {
        Some(count) if is_integer(count) => {}
        Some(count) => problems.push(format!("'count' must be an integer, got {}", value_kind(count))),
        None => problems.push("'count' is missing".to_string()),
    }

    match section.get("saving") {
        Some(saving) if saving.is_number() => {}
        Some(saving) => problems.push(format!("'saving' must be a number, got {}", value_kind(saving))),
        None => problems.push("'saving' is missing".to_string()),
    }

    match section.get("options") {
        Some(options) if options.is_object() => {
            match options.get("days_threshold") {
                Some(days) if is_integer(days) => {}
                Some(days) => problems.push(format!(
                    "'options.days_threshold' must be an integer, got {}",
                    value_kind(days)
                )),
                None => problems.push("'options.days_threshold' is missing".to_string()),
            }
            match options.get("excluded_pools") {
                Some(pools) if pools.is_object() => {}
                Some(pools) => problems.push(format!(
                    "'options.excluded_pools' must be an object, got {}",
                    value_kind(pools)
                )),
                None => problems.push("'options.excluded_pools' is missing".to_string()),
            }
            match options.get("skip_cloud_accounts") {
                Some(skip) if skip.is_array() => {}
                Some(skip) => problems.push(format!(
                    "'options.skip_cloud_accounts' must be an array, got {}",
                    value_kind(skip)
                )),
                None => problems.push("'options.skip_cloud_accounts' is missing".to_string()),
            }
        }
        Some(options) => problems.push(format!(
            "'options' must be an object, got {}",
            value_kind(options)
        )),
        None => problems.push("'options' is missing".to_string()),
    }

    match section.get("items") {
        Some(items) if items.is_array() || items.is_null() => {}
        Some(items) => problems.push(format!(
            "'items' must be an array or null, got {}",
            value_kind(items)
        )),
        None => problems.push("'items' is missing".to_string()),
    }

    if problems.is_empty() {
        CheckOutcome::passed(format!("section '{}' is well formed", section_name))
    } else {
        CheckOutcome::failed(format!("section '{}': {}", section_name, problems.join("; ")))
    }
}

/// The first item of a populated section must carry typed resource fields;
/// an empty items array implies a zero count.
pub struct ItemShapeCheck {
    section: String,
}

impl ItemShapeCheck {
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
impl ContractCheck for ItemShapeCheck {
    fn name(&self) -> CheckName {
        CheckName::ItemShape
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
        item_shape_outcome(&self.section, body, Utc::now().timestamp())
    }
}

pub(crate) fn item_shape_outcome(section_name: &str, body: &Value, now_ts: i64) -> CheckOutcome {
    let items = body
        .get(section_name)
        .and_then(|section| section.get("items"));

    let items = match items {
        None | Some(Value::Null) => {
            return CheckOutcome::passed(format!(
                "section '{}' has no items to validate",
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

    if items.is_empty() {
        // An empty list must agree with the advertised count
        let count = body
            .get(section_name)
            .and_then(|section| section.get("count"))
            .and_then(Value::as_i64);
        return match count {
            Some(0) => CheckOutcome::passed(format!(
                "section '{}' has no items and count 0",
                section_name
            )),
            Some(n) => CheckOutcome::failed(format!(
                "section '{}' has an empty items array but count {}",
                section_name, n
            )),
            None => CheckOutcome::failed(format!(
                "section '{}' has an empty items array and no integer count",
                section_name
            )),
        };
    }

    let first = &items[0];
    if !first.is_object() {
        return CheckOutcome::failed(format!(
            "expected '{}.items[0]' to be an object, got {}",
            section_name,
            value_kind(first)
        ));
    }

    let mut problems = Vec::new();

    for field in ["resource_name", "resource_id", "region"] {
        if let Some(value) = first.get(field) {
            if !value.is_null() && !value.is_string() {
                problems.push(format!(
                    "'{}' must be a string or null, got {}",
                    field,
                    value_kind(value)
                ));
            }
        }
    }

    for field in ["cloud_account_id", "cloud_type", "cloud_account_name"] {
        match first.get(field) {
            Some(value) if value.is_string() => {}
            Some(value) => problems.push(format!(
                "'{}' must be a string, got {}",
                field,
                value_kind(value)
            )),
            None => problems.push(format!("'{}' is missing", field)),
        }
    }

    match first.get("saving") {
        Some(saving) if saving.is_number() => {}
        Some(saving) => problems.push(format!(
            "'saving' must be a number, got {}",
            value_kind(saving)
        )),
        None => problems.push("'saving' is missing".to_string()),
    }

    match first.get("detected_at").map(|v| (v, v.as_i64())) {
        Some((_, Some(ts))) => {
            if ts <= DETECTED_AT_MIN {
                problems.push(format!(
                    "'detected_at' {} predates 2020-01-01 ({})",
                    ts, DETECTED_AT_MIN
                ));
            } else if ts > now_ts + DETECTED_AT_FUTURE_SLACK_SECS {
                problems.push(format!(
                    "'detected_at' {} is more than a day in the future",
                    ts
                ));
            }
        }
        Some((value, None)) => problems.push(format!(
            "'detected_at' must be an integer unix timestamp, got {}",
            value_kind(value)
        )),
        None => problems.push("'detected_at' is missing".to_string()),
    }

    if problems.is_empty() {
        CheckOutcome::passed(format!("first item of '{}' is well formed", section_name))
    } else {
        CheckOutcome::failed(format!(
            "item '{}.items[0]': {}",
            section_name,
            problems.join("; ")
        ))
    }
}

/// `cloud_accounts` must be an array of provider account records.
pub struct CloudAccountsShapeCheck;

#[async_trait]
impl ContractCheck for CloudAccountsShapeCheck {
    fn name(&self) -> CheckName {
        CheckName::CloudAccountsShape
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
        cloud_accounts_outcome(body)
    }
}

pub(crate) fn cloud_accounts_outcome(body: &Value) -> CheckOutcome {
    let accounts = match body.get("cloud_accounts") {
        Some(Value::Array(accounts)) => accounts,
        Some(other) => {
            return CheckOutcome::failed(format!(
                "'cloud_accounts' must be an array, got {}",
                value_kind(other)
            ));
        }
        None => return CheckOutcome::failed("'cloud_accounts' is missing"),
    };

    if accounts.is_empty() {
        return CheckOutcome::passed("no cloud accounts linked, nothing further to validate");
    }

    let first = &accounts[0];
    if !first.is_object() {
        return CheckOutcome::failed(format!(
            "expected 'cloud_accounts[0]' to be an object, got {}",
            value_kind(first)
        ));
    }

    let mut problems = Vec::new();

    for field in ["id", "name"] {
        match first.get(field) {
            Some(value) if value.is_string() => {}
            Some(value) => problems.push(format!(
                "'{}' must be a string, got {}",
                field,
                value_kind(value)
            )),
            None => problems.push(format!("'{}' is missing", field)),
        }
    }

    let account_type = match first.get("type") {
        Some(Value::String(raw)) => match CloudAccountType::parse(raw) {
            Some(t) => Some(t),
            None => {
                let known: Vec<&str> = CloudAccountType::ALL.iter().map(|t| t.as_str()).collect();
                problems.push(format!(
                    "unknown account type '{}', expected one of {}",
                    raw,
                    known.join(", ")
                ));
                None
            }
        },
        Some(other) => {
            problems.push(format!("'type' must be a string, got {}", value_kind(other)));
            None
        }
        None => {
            problems.push("'type' is missing".to_string());
            None
        }
    };

    if problems.is_empty() {
        let type_str = account_type.map(|t| t.as_str()).unwrap_or("unknown");
        CheckOutcome::passed(format!(
            "first cloud account is well formed (type {})",
            type_str
        ))
    } else {
        CheckOutcome::failed(format!("'cloud_accounts[0]': {}", problems.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;
    use serde_json::json;

    fn section_body(section: Value) -> Value {
        json!({ "abandoned_instances": section })
    }

    fn valid_item(now: i64) -> Value {
        json!({
            "resource_name": "web-server-01",
            "resource_id": "i-0123456789abcdef0",
            "cloud_account_id": "acc-1",
            "cloud_type": "aws_cnr",
            "cloud_account_name": "prod-aws",
            "region": "eu-west-1",
            "saving": 5.25,
            "detected_at": now - 3_600,
        })
    }

    #[test]
    fn test_top_level_all_categories_present() {
        let mut body = serde_json::Map::new();
        for key in EXPECTED_CATEGORIES {
            body.insert(key.to_string(), json!({}));
        }
        let outcome = top_level_outcome(&Value::Object(body));
        assert_eq!(outcome.verdict, Verdict::Passed);
    }

    #[test]
    fn test_top_level_missing_category_named() {
        let mut body = serde_json::Map::new();
        for key in EXPECTED_CATEGORIES.iter().skip(1) {
            body.insert(key.to_string(), json!({}));
        }
        let outcome = top_level_outcome(&Value::Object(body));
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert!(outcome.detail.contains(EXPECTED_CATEGORIES[0]));
    }

    #[test]
    fn test_top_level_non_object_fails() {
        let outcome = top_level_outcome(&json!([1, 2, 3]));
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert!(outcome.detail.contains("array"));
    }

    #[test]
    fn test_section_shape_valid() {
        let body = section_body(json!({
            "count": 2,
            "saving": 10.5,
            "options": {"days_threshold": 7, "excluded_pools": {}, "skip_cloud_accounts": []},
            "items": null,
        }));
        let outcome = section_shape_outcome("abandoned_instances", &body);
        assert_eq!(outcome.verdict, Verdict::Passed, "{}", outcome.detail);
    }

    #[test]
    fn test_section_shape_integer_saving_is_a_number() {
        let body = section_body(json!({
            "count": 0,
            "saving": 10,
            "options": {"days_threshold": 7, "excluded_pools": {}, "skip_cloud_accounts": []},
            "items": [],
        }));
        let outcome = section_shape_outcome("abandoned_instances", &body);
        assert_eq!(outcome.verdict, Verdict::Passed, "{}", outcome.detail);
    }

    #[test]
    fn test_section_shape_fractional_count_fails() {
        let body = section_body(json!({
            "count": 2.5,
            "saving": 10.5,
            "options": {"days_threshold": 7, "excluded_pools": {}, "skip_cloud_accounts": []},
            "items": null,
        }));
        let outcome = section_shape_outcome("abandoned_instances", &body);
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert!(outcome.detail.contains("'count'"));
    }

    #[test]
    fn test_section_shape_missing_options_fields_all_reported() {
        let body = section_body(json!({
            "count": 2,
            "saving": 10.5,
            "options": {},
            "items": null,
        }));
        let outcome = section_shape_outcome("abandoned_instances", &body);
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert!(outcome.detail.contains("days_threshold"));
        assert!(outcome.detail.contains("excluded_pools"));
        assert!(outcome.detail.contains("skip_cloud_accounts"));
    }

    #[test]
    fn test_section_shape_items_object_fails() {
        let body = section_body(json!({
            "count": 2,
            "saving": 10.5,
            "options": {"days_threshold": 7, "excluded_pools": {}, "skip_cloud_accounts": []},
            "items": {},
        }));
        let outcome = section_shape_outcome("abandoned_instances", &body);
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert!(outcome.detail.contains("'items'"));
    }

    #[test]
    fn test_section_shape_missing_section() {
        let outcome = section_shape_outcome("abandoned_instances", &json!({}));
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert!(outcome.detail.contains("missing"));
    }

    #[test]
    fn test_item_shape_valid_first_item() {
        let now = Utc::now().timestamp();
        let body = section_body(json!({"count": 1, "items": [valid_item(now)]}));
        let outcome = item_shape_outcome("abandoned_instances", &body, now);
        assert_eq!(outcome.verdict, Verdict::Passed, "{}", outcome.detail);
    }

    #[test]
    fn test_item_shape_null_resource_name_allowed() {
        let now = Utc::now().timestamp();
        let mut item = valid_item(now);
        item["resource_name"] = Value::Null;
        item["region"] = Value::Null;
        let body = section_body(json!({"count": 1, "items": [item]}));
        let outcome = item_shape_outcome("abandoned_instances", &body, now);
        assert_eq!(outcome.verdict, Verdict::Passed, "{}", outcome.detail);
    }

    #[test]
    fn test_item_shape_numeric_resource_name_fails() {
        let now = Utc::now().timestamp();
        let mut item = valid_item(now);
        item["resource_name"] = json!(42);
        let body = section_body(json!({"count": 1, "items": [item]}));
        let outcome = item_shape_outcome("abandoned_instances", &body, now);
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert!(outcome.detail.contains("resource_name"));
    }

    #[test]
    fn test_item_shape_detected_at_before_2020_fails() {
        let now = Utc::now().timestamp();
        let mut item = valid_item(now);
        item["detected_at"] = json!(1_400_000_000);
        let body = section_body(json!({"count": 1, "items": [item]}));
        let outcome = item_shape_outcome("abandoned_instances", &body, now);
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert!(outcome.detail.contains("detected_at"));
    }

    #[test]
    fn test_item_shape_detected_at_far_future_fails() {
        let now = Utc::now().timestamp();
        let mut item = valid_item(now);
        item["detected_at"] = json!(now + 7 * 86_400);
        let body = section_body(json!({"count": 1, "items": [item]}));
        let outcome = item_shape_outcome("abandoned_instances", &body, now);
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert!(outcome.detail.contains("future"));
    }

    #[test]
    fn test_item_shape_detected_at_tomorrow_within_slack() {
        let now = Utc::now().timestamp();
        let mut item = valid_item(now);
        item["detected_at"] = json!(now + 3_600);
        let body = section_body(json!({"count": 1, "items": [item]}));
        let outcome = item_shape_outcome("abandoned_instances", &body, now);
        assert_eq!(outcome.verdict, Verdict::Passed, "{}", outcome.detail);
    }

    #[test]
    fn test_item_shape_null_items_passes() {
        let body = section_body(json!({"count": 3, "items": null}));
        let outcome = item_shape_outcome("abandoned_instances", &body, Utc::now().timestamp());
        assert_eq!(outcome.verdict, Verdict::Passed);
    }

    #[test]
    fn test_item_shape_empty_items_with_zero_count_passes() {
        let body = section_body(json!({"count": 0, "items": []}));
        let outcome = item_shape_outcome("abandoned_instances", &body, Utc::now().timestamp());
        assert_eq!(outcome.verdict, Verdict::Passed);
    }

    #[test]
    fn test_item_shape_empty_items_with_nonzero_count_fails() {
        let body = section_body(json!({"count": 3, "items": []}));
        let outcome = item_shape_outcome("abandoned_instances", &body, Utc::now().timestamp());
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert!(outcome.detail.contains("count 3"));
    }

    #[test]
    fn test_cloud_accounts_valid() {
        let body = json!({
            "cloud_accounts": [
                {"id": "acc-1", "name": "prod-aws", "type": "aws_cnr"},
                {"id": "acc-2", "name": "dev-gcp", "type": "gcp_cnr"},
            ]
        });
        let outcome = cloud_accounts_outcome(&body);
        assert_eq!(outcome.verdict, Verdict::Passed, "{}", outcome.detail);
        assert!(outcome.detail.contains("aws_cnr"));
    }

    #[test]
    fn test_cloud_accounts_empty_passes() {
        let outcome = cloud_accounts_outcome(&json!({"cloud_accounts": []}));
        assert_eq!(outcome.verdict, Verdict::Passed);
    }

    #[test]
    fn test_cloud_accounts_not_array_fails() {
        let outcome = cloud_accounts_outcome(&json!({"cloud_accounts": {}}));
        assert_eq!(outcome.verdict, Verdict::Failed);
    }

    #[test]
    fn test_cloud_accounts_unknown_type_fails() {
        let body = json!({
            "cloud_accounts": [{"id": "acc-1", "name": "metal", "type": "bare_metal"}]
        });
        let outcome = cloud_accounts_outcome(&body);
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert!(outcome.detail.contains("bare_metal"));
        assert!(outcome.detail.contains("aws_cnr"));
    }

    #[test]
    fn test_cloud_accounts_missing_name_fails() {
        let body = json!({
            "cloud_accounts": [{"id": "acc-1", "type": "aws_cnr"}]
        });
        let outcome = cloud_accounts_outcome(&body);
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert!(outcome.detail.contains("'name'"));
    }
}
