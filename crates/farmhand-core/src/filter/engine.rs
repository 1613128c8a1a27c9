use crate::domain::Buyer;
use crate::filter::state::{FilterState, QuickFilter, SmartGroup, Toggle};
use serde::{Deserialize, Serialize};

pub const HIGH_SCORE_MIN: i64 = 80;
pub const HOT_SCORE_MIN: i64 = 85;
pub const NEW_WINDOW_SECS: i64 = 7 * 86_400;

impl SmartGroup {
    pub fn matches(self, buyer: &Buyer) -> bool {
        match self {
            SmartGroup::Vip => buyer.vip,
            SmartGroup::HighValue => buyer.score >= HIGH_SCORE_MIN,
            SmartGroup::Hot => buyer.score >= HOT_SCORE_MIN,
            SmartGroup::Investor => buyer.has_tag_containing("investor"),
            SmartGroup::CashBuyer => buyer.has_tag_containing("cash"),
            SmartGroup::Wholesaler => buyer.has_tag_containing("wholesaler"),
        }
    }
}

impl QuickFilter {
    pub fn matches(self, buyer: &Buyer, now_utc: i64) -> bool {
        match self {
            QuickFilter::Vip => buyer.vip,
            QuickFilter::HighScore => buyer.score >= HIGH_SCORE_MIN,
            QuickFilter::Hot => buyer.score >= HOT_SCORE_MIN,
            QuickFilter::New => buyer.created_at >= now_utc - NEW_WINDOW_SECS,
        }
    }
}

/// Stable filter: keeps the input order, never mutates, never re-sorts.
/// Duplicates pass through independently.
pub fn filter_buyers<'a>(
    buyers: &'a [Buyer],
    state: &FilterState,
    now_utc: i64,
) -> Vec<&'a Buyer> {
    buyers
        .iter()
        .filter(|buyer| matches(buyer, state, now_utc))
        .collect()
}

/// Evaluates every active predicate against one buyer; predicates AND.
/// Missing fields never match a positive predicate and never error.
pub fn matches(buyer: &Buyer, state: &FilterState, now_utc: i64) -> bool {
    if !matches_search(buyer, &state.search) {
        return false;
    }

    // Required tags: every one must independently hit some buyer tag.
    if !state.tags.iter().all(|tag| buyer.has_tag_containing(tag)) {
        return false;
    }

    // Excluded tags: any hit rejects.
    if state
        .exclude_tags
        .iter()
        .any(|tag| buyer.has_tag_containing(tag))
    {
        return false;
    }

    // Locations: unlike tags, one match among the required set suffices.
    if !state.locations.is_empty()
        && !state
            .locations
            .iter()
            .any(|location| matches_location(buyer, location))
    {
        return false;
    }

    // Property types follow the location rule: any hit among the set.
    if !state.property_types.is_empty()
        && !state.property_types.iter().any(|wanted| {
            let needle = wanted.to_lowercase();
            buyer
                .property_type
                .iter()
                .any(|entry| entry.to_lowercase().contains(&needle))
        })
    {
        return false;
    }

    if !state.vip.allows(buyer.vip)
        || !state.vetted.allows(buyer.vetted)
        || !state.can_email.allows(buyer.can_receive_email)
        || !state.can_sms.allows(buyer.can_receive_sms)
    {
        return false;
    }

    if let Some(min) = state.min_score {
        if buyer.score < min {
            return false;
        }
    }
    if let Some(max) = state.max_score {
        if buyer.score > max {
            return false;
        }
    }

    if let Some(after) = state.created_after {
        if buyer.created_at < after {
            return false;
        }
    }
    if let Some(before) = state.created_before {
        if buyer.created_at > before {
            return false;
        }
    }

    if !state
        .quick
        .iter()
        .all(|quick| quick.matches(buyer, now_utc))
    {
        return false;
    }

    if let Some(group) = state.smart_group {
        if !group.matches(buyer) {
            return false;
        }
    }

    true
}

fn matches_search(buyer: &Buyer, search: &str) -> bool {
    let term = search.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [
        &buyer.fname,
        &buyer.lname,
        &buyer.email,
        &buyer.phone,
        &buyer.phone2,
        &buyer.phone3,
        &buyer.company,
    ]
    .into_iter()
    .any(|field| {
        field
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(&term))
    })
}

fn matches_location(buyer: &Buyer, location: &str) -> bool {
    let needle = location.to_lowercase();
    let fields = [
        &buyer.mailing_city,
        &buyer.mailing_state,
        &buyer.mailing_address,
    ];
    if fields.into_iter().any(|field| {
        field
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(&needle))
    }) {
        return true;
    }
    buyer
        .locations
        .iter()
        .any(|entry| entry.to_lowercase().contains(&needle))
}

/// Sidebar badge counts, one fixed predicate per group, always evaluated
/// against the full unfiltered collection so navigation counts stay put
/// while the visible list narrows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartGroupCounts {
    pub vip: usize,
    pub hot: usize,
    pub high_value: usize,
    pub investor: usize,
    pub cash_buyer: usize,
    pub wholesaler: usize,
}

impl SmartGroupCounts {
    pub fn get(&self, group: SmartGroup) -> usize {
        match group {
            SmartGroup::Vip => self.vip,
            SmartGroup::Hot => self.hot,
            SmartGroup::HighValue => self.high_value,
            SmartGroup::Investor => self.investor,
            SmartGroup::CashBuyer => self.cash_buyer,
            SmartGroup::Wholesaler => self.wholesaler,
        }
    }
}

pub fn smart_group_counts(buyers: &[Buyer]) -> SmartGroupCounts {
    let mut counts = SmartGroupCounts::default();
    for buyer in buyers {
        for group in SmartGroup::ALL {
            if group.matches(buyer) {
                match group {
                    SmartGroup::Vip => counts.vip += 1,
                    SmartGroup::Hot => counts.hot += 1,
                    SmartGroup::HighValue => counts.high_value += 1,
                    SmartGroup::Investor => counts.investor += 1,
                    SmartGroup::CashBuyer => counts.cash_buyer += 1,
                    SmartGroup::Wholesaler => counts.wholesaler += 1,
                }
            }
        }
    }
    counts
}
