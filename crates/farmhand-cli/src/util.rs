use anyhow::{anyhow, Result};
use farmhand_core::domain::{BuyerId, GroupId};
use farmhand_core::time;
use std::str::FromStr;

pub fn now_utc() -> i64 {
    time::now_utc()
}

pub fn parse_local_timestamp(input: &str) -> Result<i64> {
    time::parse_local_timestamp(input).map_err(Into::into)
}

pub fn format_timestamp_date(ts: i64) -> String {
    time::format_timestamp_date(ts)
}

pub fn parse_buyer_id(raw: &str) -> Result<BuyerId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("buyer id cannot be empty"));
    }
    BuyerId::from_str(trimmed).map_err(|_| anyhow!("invalid buyer id"))
}

pub fn parse_group_id(raw: &str) -> Result<GroupId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("group id cannot be empty"));
    }
    GroupId::from_str(trimmed).map_err(|_| anyhow!("invalid group id"))
}

/// Editing with an empty string clears the field.
pub fn normalize_optional_value(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Comma-separated flag values become label lists; empty pieces drop out.
pub fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
