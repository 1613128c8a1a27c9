use crate::commands::{print_json, Context};
use crate::util::now_utc;
use anyhow::Result;
use clap::Args;
use farmhand_core::dto::{DashboardDto, StatusCountDto};
use farmhand_core::filter::{smart_group_counts, SmartGroup, NEW_WINDOW_SECS};
use std::collections::BTreeMap;

#[derive(Debug, Args)]
pub struct DashboardArgs {}

pub fn show_dashboard(ctx: &Context<'_>, _args: DashboardArgs) -> Result<()> {
    let now = now_utc();
    let buyers = ctx.store.buyers().list_all()?;
    let sellers = ctx.store.sellers().list_all()?;
    let groups = ctx.store.groups().list_all()?;

    let average_score = if buyers.is_empty() {
        0.0
    } else {
        let total: i64 = buyers.iter().map(|buyer| buyer.score).sum();
        total as f64 / buyers.len() as f64
    };
    let new_this_week = buyers
        .iter()
        .filter(|buyer| buyer.created_at >= now - NEW_WINDOW_SECS)
        .count();

    let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();
    for buyer in &buyers {
        *status_counts
            .entry(buyer.status.as_str().to_string())
            .or_default() += 1;
    }
    let statuses: Vec<StatusCountDto> = status_counts
        .into_iter()
        .map(|(status, count)| StatusCountDto { status, count })
        .collect();

    let dashboard = DashboardDto {
        total_buyers: buyers.len(),
        total_sellers: sellers.len(),
        total_groups: groups.len(),
        average_score,
        new_this_week,
        smart_groups: smart_group_counts(&buyers),
        statuses,
    };

    if ctx.json {
        print_json(&dashboard)?;
        return Ok(());
    }

    println!("Buyers: {}", dashboard.total_buyers);
    println!("Sellers: {}", dashboard.total_sellers);
    println!("Groups: {}", dashboard.total_groups);
    println!("Average score: {:.1}", dashboard.average_score);
    println!("New this week: {}", dashboard.new_this_week);
    println!();
    println!("Smart groups:");
    for group in SmartGroup::ALL {
        println!(
            "  {}: {}",
            group.label(),
            dashboard.smart_groups.get(group)
        );
    }
    if !dashboard.statuses.is_empty() {
        println!();
        println!("Statuses:");
        for entry in &dashboard.statuses {
            println!("  {}: {}", entry.status, entry.count);
        }
    }
    Ok(())
}
