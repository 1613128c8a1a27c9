use crate::domain::ids::BuyerId;
use serde::{Deserialize, Serialize};

/// Lifecycle label for a buyer. The set is open: labels outside the known
/// ones round-trip through `Other` instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuyerStatus {
    Lead,
    Qualified,
    Active,
    UnderContract,
    Closed,
    Other(String),
}

impl BuyerStatus {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "lead" => BuyerStatus::Lead,
            "qualified" => BuyerStatus::Qualified,
            "active" => BuyerStatus::Active,
            "under_contract" => BuyerStatus::UnderContract,
            "closed" => BuyerStatus::Closed,
            _ => BuyerStatus::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BuyerStatus::Lead => "lead",
            BuyerStatus::Qualified => "qualified",
            BuyerStatus::Active => "active",
            BuyerStatus::UnderContract => "under_contract",
            BuyerStatus::Closed => "closed",
            BuyerStatus::Other(label) => label,
        }
    }
}

impl Default for BuyerStatus {
    fn default() -> Self {
        BuyerStatus::Lead
    }
}

impl From<String> for BuyerStatus {
    fn from(value: String) -> Self {
        BuyerStatus::parse(&value)
    }
}

impl From<BuyerStatus> for String {
    fn from(value: BuyerStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    pub id: BuyerId,
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub phone2: Option<String>,
    pub phone3: Option<String>,
    pub company: Option<String>,
    pub score: i64,
    pub notes: Option<String>,
    pub mailing_address: Option<String>,
    pub mailing_city: Option<String>,
    pub mailing_state: Option<String>,
    pub mailing_zip: Option<String>,
    pub locations: Vec<String>,
    pub tags: Vec<String>,
    pub vetted: bool,
    pub vip: bool,
    pub can_receive_sms: bool,
    pub can_receive_email: bool,
    pub property_type: Vec<String>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub timeline: Option<String>,
    pub source: Option<String>,
    pub status: BuyerStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Buyer {
    /// Display name falls back: full name, first+last, first, last, placeholder.
    pub fn display_name(&self) -> String {
        if let Some(full) = non_empty(&self.full_name) {
            return full.to_string();
        }
        match (non_empty(&self.fname), non_empty(&self.lname)) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => "No Name".to_string(),
        }
    }

    /// Substring tag membership, case-insensitive: "cash" matches "Cash Buyer".
    pub fn has_tag_containing(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
