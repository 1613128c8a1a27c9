use crate::filter::FilterParseError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tri-state constraint over a boolean field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    #[default]
    Any,
    Yes,
    No,
}

impl Toggle {
    pub fn allows(self, value: bool) -> bool {
        match self {
            Toggle::Any => true,
            Toggle::Yes => value,
            Toggle::No => !value,
        }
    }
}

impl FromStr for Toggle {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" => Ok(Toggle::Any),
            "yes" | "true" | "y" => Ok(Toggle::Yes),
            "no" | "false" | "n" => Ok(Toggle::No),
            other => Err(FilterParseError::InvalidToggle(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickFilter {
    Vip,
    HighScore,
    Hot,
    New,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 4] = [
        QuickFilter::Vip,
        QuickFilter::HighScore,
        QuickFilter::Hot,
        QuickFilter::New,
    ];

    pub fn key(self) -> &'static str {
        match self {
            QuickFilter::Vip => "vip",
            QuickFilter::HighScore => "high-score",
            QuickFilter::Hot => "hot",
            QuickFilter::New => "new",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuickFilter::Vip => "VIP",
            QuickFilter::HighScore => "High Score",
            QuickFilter::Hot => "Hot Leads",
            QuickFilter::New => "New This Week",
        }
    }
}

impl FromStr for QuickFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vip" => Ok(QuickFilter::Vip),
            "high-score" | "highscore" => Ok(QuickFilter::HighScore),
            "hot" => Ok(QuickFilter::Hot),
            "new" => Ok(QuickFilter::New),
            other => Err(FilterParseError::InvalidQuickFilter(other.to_string())),
        }
    }
}

/// Predefined sidebar shortcut mapped to a single fixed predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmartGroup {
    Vip,
    HighValue,
    Hot,
    Investor,
    CashBuyer,
    Wholesaler,
}

impl SmartGroup {
    pub const ALL: [SmartGroup; 6] = [
        SmartGroup::Vip,
        SmartGroup::Hot,
        SmartGroup::HighValue,
        SmartGroup::Investor,
        SmartGroup::CashBuyer,
        SmartGroup::Wholesaler,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SmartGroup::Vip => "vip",
            SmartGroup::HighValue => "high-value",
            SmartGroup::Hot => "hot",
            SmartGroup::Investor => "investor",
            SmartGroup::CashBuyer => "cash-buyer",
            SmartGroup::Wholesaler => "wholesaler",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SmartGroup::Vip => "VIP Clients",
            SmartGroup::HighValue => "High Value Buyers",
            SmartGroup::Hot => "Hot Leads",
            SmartGroup::Investor => "Investors",
            SmartGroup::CashBuyer => "Cash Buyers",
            SmartGroup::Wholesaler => "Wholesalers",
        }
    }
}

impl FromStr for SmartGroup {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vip" => Ok(SmartGroup::Vip),
            "high-value" => Ok(SmartGroup::HighValue),
            "hot" => Ok(SmartGroup::Hot),
            "investor" => Ok(SmartGroup::Investor),
            "cash-buyer" => Ok(SmartGroup::CashBuyer),
            "wholesaler" => Ok(SmartGroup::Wholesaler),
            other => Err(FilterParseError::InvalidSmartGroup(other.to_string())),
        }
    }
}

/// The full filter surface. Not persisted; every active predicate is ANDed
/// by the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search: String,
    /// Every entry must independently match some buyer tag (AND).
    pub tags: Vec<String>,
    /// Any match rejects the buyer (OR).
    pub exclude_tags: Vec<String>,
    /// At least one entry must match (OR).
    pub locations: Vec<String>,
    /// At least one entry must match (OR).
    pub property_types: Vec<String>,
    pub min_score: Option<i64>,
    pub max_score: Option<i64>,
    pub created_after: Option<i64>,
    pub created_before: Option<i64>,
    pub vip: Toggle,
    pub vetted: Toggle,
    pub can_email: Toggle,
    pub can_sms: Toggle,
    pub quick: Vec<QuickFilter>,
    pub smart_group: Option<SmartGroup>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.tags.is_empty()
            && self.exclude_tags.is_empty()
            && self.locations.is_empty()
            && self.property_types.is_empty()
            && self.min_score.is_none()
            && self.max_score.is_none()
            && self.created_after.is_none()
            && self.created_before.is_none()
            && self.vip == Toggle::Any
            && self.vetted == Toggle::Any
            && self.can_email == Toggle::Any
            && self.can_sms == Toggle::Any
            && self.quick.is_empty()
            && self.smart_group.is_none()
    }

    pub fn active_count(&self) -> usize {
        let mut count = 0;
        if !self.search.trim().is_empty() {
            count += 1;
        }
        count += self.tags.len() + self.exclude_tags.len();
        if !self.locations.is_empty() {
            count += 1;
        }
        if !self.property_types.is_empty() {
            count += 1;
        }
        count += [self.min_score, self.max_score].iter().flatten().count();
        count += [self.created_after, self.created_before]
            .iter()
            .flatten()
            .count();
        count += [self.vip, self.vetted, self.can_email, self.can_sms]
            .iter()
            .filter(|toggle| **toggle != Toggle::Any)
            .count();
        count += self.quick.len();
        if self.smart_group.is_some() {
            count += 1;
        }
        count
    }
}

/// Score bound inputs arrive as raw text; empty or non-numeric means unset,
/// never zero.
pub fn parse_score_bound(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_score_bound, FilterState, QuickFilter, SmartGroup, Toggle};
    use std::str::FromStr;

    #[test]
    fn toggle_allows() {
        assert!(Toggle::Any.allows(true));
        assert!(Toggle::Any.allows(false));
        assert!(Toggle::Yes.allows(true));
        assert!(!Toggle::Yes.allows(false));
        assert!(Toggle::No.allows(false));
        assert!(!Toggle::No.allows(true));
    }

    #[test]
    fn toggle_parses_aliases() {
        assert_eq!(Toggle::from_str("ANY").unwrap(), Toggle::Any);
        assert_eq!(Toggle::from_str("yes").unwrap(), Toggle::Yes);
        assert_eq!(Toggle::from_str("false").unwrap(), Toggle::No);
        assert!(Toggle::from_str("maybe").is_err());
    }

    #[test]
    fn quick_filter_parses_both_spellings() {
        assert_eq!(
            QuickFilter::from_str("high-score").unwrap(),
            QuickFilter::HighScore
        );
        assert_eq!(
            QuickFilter::from_str("highScore").unwrap(),
            QuickFilter::HighScore
        );
        assert!(QuickFilter::from_str("followup").is_err());
    }

    #[test]
    fn smart_group_parses_keys() {
        assert_eq!(
            SmartGroup::from_str("cash-buyer").unwrap(),
            SmartGroup::CashBuyer
        );
        assert!(SmartGroup::from_str("cold").is_err());
    }

    #[test]
    fn score_bound_treats_garbage_as_unset() {
        assert_eq!(parse_score_bound("80"), Some(80));
        assert_eq!(parse_score_bound(" 80 "), Some(80));
        assert_eq!(parse_score_bound(""), None);
        assert_eq!(parse_score_bound("abc"), None);
    }

    #[test]
    fn default_state_is_empty() {
        assert!(FilterState::default().is_empty());
        assert_eq!(FilterState::default().active_count(), 0);
    }

    #[test]
    fn active_count_tallies_predicates() {
        let state = FilterState {
            search: "john".to_string(),
            tags: vec!["cash".to_string()],
            min_score: Some(50),
            vip: Toggle::Yes,
            quick: vec![QuickFilter::Hot],
            ..Default::default()
        };
        assert_eq!(state.active_count(), 5);
    }
}
