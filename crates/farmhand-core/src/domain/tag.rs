use crate::domain::ids::TagId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TAG_COLOR: &str = "#3B82F6";

/// Catalog entry for a tag label. Buyers carry tag labels inline; this
/// catalog tracks color, protection, and an aggregate usage counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: String,
    pub is_protected: bool,
    pub usage_count: i64,
    pub created_at: i64,
}
