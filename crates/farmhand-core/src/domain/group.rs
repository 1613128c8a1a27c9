use crate::domain::ids::GroupId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GroupKind {
    Manual,
    Rule,
    Other(String),
}

impl GroupKind {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "manual" => GroupKind::Manual,
            "rule" => GroupKind::Rule,
            _ => GroupKind::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GroupKind::Manual => "manual",
            GroupKind::Rule => "rule",
            GroupKind::Other(label) => label,
        }
    }
}

impl Default for GroupKind {
    fn default() -> Self {
        GroupKind::Manual
    }
}

impl From<String> for GroupKind {
    fn from(value: String) -> Self {
        GroupKind::parse(&value)
    }
}

impl From<GroupKind> for String {
    fn from(value: GroupKind) -> Self {
        value.as_str().to_string()
    }
}

/// Named buyer collection. Membership lives in the buyer_groups join;
/// `criteria` is an opaque structured definition carried for rule groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: Option<String>,
    pub kind: GroupKind,
    pub criteria: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
