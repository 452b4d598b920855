use serde::{Deserialize, Serialize};

/// Every top-level key the overview report must carry. The list is part of
/// the endpoint contract and fixed; extra keys are tolerated, missing ones
/// are not.
pub const EXPECTED_CATEGORIES: &[&str] = &[
    "abandoned_snapshots",
    "abandoned_instances",
    "obsolete_images",
    "instances_for_migration",
    "underutilized_instances",
    "unpaid_databases",
    "abandoned_object_storages",
    "abandoned_managed_databases",
    "abandoned_ip",
    "abandoned_resources",
    "abandoned_kubernetes_clusters",
    "instance_generation_upgrade",
    "abandoned_volumes",
    "short_living_instances",
    "dismissed_optimizations",
    "excluded_optimizations",
    "abandoned_users",
    "instance_sharding",
    "obsolete_snapshot_chains",
    "rightsizing_instances",
    "cloud_accounts",
];

/// Category whose section and item shape are validated in depth.
pub const DEFAULT_SECTION: &str = "abandoned_instances";

/// Category known to surface upstream collector failures in an `error` field.
pub const ERROR_SECTION: &str = "instance_generation_upgrade";

/// Substring expected inside an embedded section error, taken from the
/// recorded sample response. Overridable per run.
pub const DEFAULT_ERROR_MARKER: &str = "500 Server Error";

/// 2020-01-01T00:00:00Z. Detection timestamps before this predate the
/// product and indicate garbage data.
pub const DETECTED_AT_MIN: i64 = 1_577_836_800;

/// Clock skew allowance for `detected_at`: one day into the future.
pub const DETECTED_AT_FUTURE_SLACK_SECS: i64 = 86_400;

/// Provider type of a linked cloud account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudAccountType {
    AwsCnr,
    GcpCnr,
    AzureCnr,
    AlibabaCnr,
}

impl CloudAccountType {
    pub const ALL: [CloudAccountType; 4] = [
        CloudAccountType::AwsCnr,
        CloudAccountType::GcpCnr,
        CloudAccountType::AzureCnr,
        CloudAccountType::AlibabaCnr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwsCnr => "aws_cnr",
            Self::GcpCnr => "gcp_cnr",
            Self::AzureCnr => "azure_cnr",
            Self::AlibabaCnr => "alibaba_cnr",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == raw)
    }
}

impl std::fmt::Display for CloudAccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_category_list_is_complete_and_unique() {
        assert_eq!(EXPECTED_CATEGORIES.len(), 21);
        let unique: HashSet<_> = EXPECTED_CATEGORIES.iter().collect();
        assert_eq!(unique.len(), EXPECTED_CATEGORIES.len());
    }

    #[test]
    fn test_category_list_contains_checked_sections() {
        assert!(EXPECTED_CATEGORIES.contains(&DEFAULT_SECTION));
        assert!(EXPECTED_CATEGORIES.contains(&ERROR_SECTION));
        assert!(EXPECTED_CATEGORIES.contains(&"cloud_accounts"));
    }

    #[test]
    fn test_cloud_account_type_round_trip() {
        for t in CloudAccountType::ALL {
            assert_eq!(CloudAccountType::parse(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_cloud_account_type_rejects_unknown() {
        assert_eq!(CloudAccountType::parse("digitalocean_cnr"), None);
        assert_eq!(CloudAccountType::parse(""), None);
        assert_eq!(CloudAccountType::parse("AWS_CNR"), None);
    }

    #[test]
    fn test_cloud_account_type_serde_names() {
        let t: CloudAccountType = serde_json::from_str("\"aws_cnr\"").unwrap();
        assert_eq!(t, CloudAccountType::AwsCnr);
        assert_eq!(serde_json::to_string(&CloudAccountType::AzureCnr).unwrap(), "\"azure_cnr\"");
    }

    #[test]
    fn test_detected_at_floor_is_2020() {
        use chrono::TimeZone;
        let floor = chrono::Utc.timestamp_opt(DETECTED_AT_MIN, 0).unwrap();
        assert_eq!(floor.to_rfc3339(), "2020-01-01T00:00:00+00:00");
    }
}
