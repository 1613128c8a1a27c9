use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::{now_utc, parse_buyer_id, parse_group_id};
use anyhow::Result;
use clap::{Args, Subcommand};
use farmhand_core::domain::GroupKind;
use farmhand_store::repo::GroupNew;
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    Create(GroupCreateArgs),
    Ls(GroupListArgs),
    Rm(GroupRemoveArgs),
    /// Add buyers to a group
    #[command(name = "add-buyers")]
    AddBuyers(GroupAddBuyersArgs),
    /// Remove one buyer from a group
    #[command(name = "rm-buyer")]
    RmBuyer(GroupRemoveBuyerArgs),
    /// List a group's member buyers
    Members(GroupMembersArgs),
}

#[derive(Debug, Args)]
pub struct GroupCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub kind: Option<String>,
    /// Opaque criteria document for rule groups.
    #[arg(long)]
    pub criteria: Option<String>,
}

#[derive(Debug, Args)]
pub struct GroupListArgs {}

#[derive(Debug, Args)]
pub struct GroupRemoveArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct GroupAddBuyersArgs {
    pub group: String,
    #[arg(required = true)]
    pub buyers: Vec<String>,
}

#[derive(Debug, Args)]
pub struct GroupRemoveBuyerArgs {
    pub group: String,
    pub buyer: String,
}

#[derive(Debug, Args)]
pub struct GroupMembersArgs {
    pub id: String,
}

#[derive(Debug, Serialize)]
struct GroupDto {
    id: String,
    name: String,
    description: Option<String>,
    kind: String,
    members: i64,
}

pub fn create_group(ctx: &Context<'_>, args: GroupCreateArgs) -> Result<()> {
    let group = ctx.store.groups().create(
        now_utc(),
        GroupNew {
            name: args.name.trim().to_string(),
            description: args.description,
            kind: GroupKind::parse(args.kind.as_deref().unwrap_or_default()),
            criteria: args.criteria,
        },
    )?;

    if ctx.json {
        print_json(&group)?;
    } else {
        println!("created group {} {}", group.id, group.name);
    }
    Ok(())
}

pub fn list_groups(ctx: &Context<'_>, _args: GroupListArgs) -> Result<()> {
    let groups = ctx.store.groups().list_all()?;
    let mut items = Vec::with_capacity(groups.len());
    for group in groups {
        let members = ctx.store.groups().member_count(group.id)?;
        items.push(GroupDto {
            id: group.id.to_string(),
            name: group.name,
            description: group.description,
            kind: group.kind.as_str().to_string(),
            members,
        });
    }

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no groups");
        return Ok(());
    }

    for item in items {
        let description = item
            .description
            .map(|text| format!("  {}", text))
            .unwrap_or_default();
        println!(
            "{}  {} [{}] ({}){}",
            item.id, item.name, item.kind, item.members, description
        );
    }
    Ok(())
}

pub fn remove_group(ctx: &Context<'_>, args: GroupRemoveArgs) -> Result<()> {
    let id = parse_group_id(&args.id)?;
    ctx.store.groups().delete(id)?;
    if ctx.json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("deleted group {}", id);
    }
    Ok(())
}

pub fn add_buyers(ctx: &Context<'_>, args: GroupAddBuyersArgs) -> Result<()> {
    let group_id = parse_group_id(&args.group)?;
    if ctx.store.groups().get(group_id)?.is_none() {
        return Err(not_found("group not found"));
    }
    let mut buyer_ids = Vec::with_capacity(args.buyers.len());
    for raw in &args.buyers {
        buyer_ids.push(parse_buyer_id(raw)?);
    }

    let added = ctx.store.groups().add_buyers(&buyer_ids, &[group_id])?;
    if ctx.json {
        print_json(&serde_json::json!({ "group": group_id, "added": added }))?;
    } else {
        println!("added {} buyers to {}", added, group_id);
    }
    Ok(())
}

pub fn remove_buyer(ctx: &Context<'_>, args: GroupRemoveBuyerArgs) -> Result<()> {
    let group_id = parse_group_id(&args.group)?;
    let buyer_id = parse_buyer_id(&args.buyer)?;
    ctx.store.groups().remove_buyer(buyer_id, group_id)?;
    if ctx.json {
        print_json(&serde_json::json!({ "group": group_id, "removed": buyer_id }))?;
    } else {
        println!("removed {} from {}", buyer_id, group_id);
    }
    Ok(())
}

pub fn list_members(ctx: &Context<'_>, args: GroupMembersArgs) -> Result<()> {
    let group_id = parse_group_id(&args.id)?;
    let group = ctx
        .store
        .groups()
        .get(group_id)?
        .ok_or_else(|| not_found("group not found"))?;

    let member_ids = ctx.store.groups().member_ids(group_id)?;
    let mut members = Vec::with_capacity(member_ids.len());
    for id in member_ids {
        if let Some(buyer) = ctx.store.buyers().get(id)? {
            members.push(buyer);
        }
    }

    if ctx.json {
        print_json(&serde_json::json!({
            "group": group.name,
            "members": members,
        }))?;
        return Ok(());
    }

    println!("{} ({} members)", group.name, members.len());
    for buyer in members {
        println!("  {}  {}", buyer.id, buyer.display_name());
    }
    Ok(())
}
