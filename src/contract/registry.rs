use std::sync::LazyLock;
use serde::{Deserialize, Serialize};
use super::check::ContractCheck;
use super::checks::consistency::{CountConsistencyCheck, EmbeddedErrorCheck};
use super::checks::shape::{
    CloudAccountsShapeCheck, ItemShapeCheck, SectionShapeCheck, TopLevelShapeCheck,
};
use super::checks::transport::{ContentTypeCheck, StatusCodeCheck, UnauthorizedRejectionCheck};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckName {
    StatusCode,
    ContentType,
    TopLevelShape,
    SectionShape,
    ItemShape,
    CloudAccountsShape,
    CountConsistency,
    EmbeddedErrorShape,
    UnauthorizedRejection,
}

impl CheckName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StatusCode => "status-code",
            Self::ContentType => "content-type",
            Self::TopLevelShape => "top-level-shape",
            Self::SectionShape => "section-shape",
            Self::ItemShape => "item-shape",
            Self::CloudAccountsShape => "cloud-accounts-shape",
            Self::CountConsistency => "count-consistency",
            Self::EmbeddedErrorShape => "embedded-error-shape",
            Self::UnauthorizedRejection => "unauthorized-rejection",
        }
    }
}

impl std::fmt::Display for CheckName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct CheckDefinition {
    pub name: CheckName,
    pub display_name: &'static str,
    pub description: &'static str,
    /// Whether the check issues a request of its own instead of reading the
    /// shared snapshot.
    pub needs_network: bool,
}

/// The suite, in reporting order. Numbering in reports is this position
/// plus one; execution follows the same order although the checks are
/// independent of each other.
pub static CHECK_REGISTRY: LazyLock<Vec<CheckDefinition>> = LazyLock::new(|| {
    vec![
        CheckDefinition {
            name: CheckName::StatusCode,
            display_name: "Status code",
            description: "Authorized GET answers with HTTP 200",
            needs_network: false,
        },
        CheckDefinition {
            name: CheckName::ContentType,
            display_name: "Content type",
            description: "Content-Type header contains application/json",
            needs_network: false,
        },
        CheckDefinition {
            name: CheckName::TopLevelShape,
            display_name: "Top-level shape",
            description: "Body is an object carrying every expected category key",
            needs_network: false,
        },
        CheckDefinition {
            name: CheckName::SectionShape,
            display_name: "Section shape",
            description: "abandoned_instances carries count, saving, options and items of the right types",
            needs_network: false,
        },
        CheckDefinition {
            name: CheckName::ItemShape,
            display_name: "Item shape",
            description: "First abandoned_instances item carries typed resource fields and a sane detected_at",
            needs_network: false,
        },
        CheckDefinition {
            name: CheckName::CloudAccountsShape,
            display_name: "Cloud accounts shape",
            description: "cloud_accounts is an array of accounts with a known provider type",
            needs_network: false,
        },
        CheckDefinition {
            name: CheckName::CountConsistency,
            display_name: "Count consistency",
            description: "abandoned_instances item count matches its count field",
            needs_network: false,
        },
        CheckDefinition {
            name: CheckName::EmbeddedErrorShape,
            display_name: "Embedded error shape",
            description: "An instance_generation_upgrade error, if present, is a string containing the expected marker",
            needs_network: false,
        },
        CheckDefinition {
            name: CheckName::UnauthorizedRejection,
            display_name: "Unauthorized rejection",
            description: "GET without an Authorization header is rejected with 401",
            needs_network: true,
        },
    ]
});

pub fn definition_for(name: CheckName) -> Option<&'static CheckDefinition> {
    CHECK_REGISTRY.iter().find(|def| def.name == name)
}

/// Instantiate the suite in registry order.
pub fn default_checks() -> Vec<Box<dyn ContractCheck>> {
    CHECK_REGISTRY.iter().map(|def| instantiate(def.name)).collect()
}

fn instantiate(name: CheckName) -> Box<dyn ContractCheck> {
    match name {
        CheckName::StatusCode => Box::new(StatusCodeCheck),
        CheckName::ContentType => Box::new(ContentTypeCheck),
        CheckName::TopLevelShape => Box::new(TopLevelShapeCheck),
        CheckName::SectionShape => Box::new(SectionShapeCheck::default_section()),
        CheckName::ItemShape => Box::new(ItemShapeCheck::default_section()),
        CheckName::CloudAccountsShape => Box::new(CloudAccountsShapeCheck),
        CheckName::CountConsistency => Box::new(CountConsistencyCheck::default_section()),
        CheckName::EmbeddedErrorShape => Box::new(EmbeddedErrorCheck),
        CheckName::UnauthorizedRejection => Box::new(UnauthorizedRejectionCheck),
    }
}
