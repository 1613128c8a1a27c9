pub mod domain;
pub mod dto;
pub mod filter;
pub mod time;

pub use domain::*;
pub use dto::*;
pub use filter::{
    filter_buyers, smart_group_counts, FilterParseError, FilterState, QuickFilter, SmartGroup,
    SmartGroupCounts, Toggle,
};
