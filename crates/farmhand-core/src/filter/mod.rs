mod engine;
mod state;

use thiserror::Error;

pub use engine::{
    filter_buyers, matches, smart_group_counts, SmartGroupCounts, HIGH_SCORE_MIN, HOT_SCORE_MIN,
    NEW_WINDOW_SECS,
};
pub use state::{parse_score_bound, FilterState, QuickFilter, SmartGroup, Toggle};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("invalid tri-state value: {0} (expected any|yes|no)")]
    InvalidToggle(String),
    #[error("invalid quick filter: {0}")]
    InvalidQuickFilter(String),
    #[error("invalid smart group: {0}")]
    InvalidSmartGroup(String),
}
