use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{now_utc, parse_buyer_id};
use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum TagCommand {
    /// Attach a tag to a buyer
    Add(TagAddArgs),
    /// Detach a tag from a buyer
    Rm(TagRemoveArgs),
    /// List the tag catalog with usage counts
    Ls(TagListArgs),
    /// Remove a tag from the catalog (protected tags refuse)
    Delete(TagDeleteArgs),
}

#[derive(Debug, Args)]
pub struct TagAddArgs {
    pub id: String,
    pub tag: String,
}

#[derive(Debug, Args)]
pub struct TagRemoveArgs {
    pub id: String,
    pub tag: String,
}

#[derive(Debug, Args)]
pub struct TagListArgs {}

#[derive(Debug, Args)]
pub struct TagDeleteArgs {
    pub tag: String,
}

#[derive(Debug, Serialize)]
struct TagDto {
    name: String,
    color: String,
    protected: bool,
    usage_count: i64,
}

pub fn add_tag(ctx: &Context<'_>, args: TagAddArgs) -> Result<()> {
    let id = parse_buyer_id(&args.id)?;
    let label = args.tag.trim();
    if label.is_empty() {
        return Err(invalid_input("tag cannot be empty"));
    }
    let buyer = ctx.store.buyers().add_tag(now_utc(), id, label)?;

    if ctx.json {
        print_json(&serde_json::json!({ "id": id, "tags": buyer.tags }))?;
    } else {
        println!("tag added to {}", id);
    }
    Ok(())
}

pub fn remove_tag(ctx: &Context<'_>, args: TagRemoveArgs) -> Result<()> {
    let id = parse_buyer_id(&args.id)?;
    let buyer = ctx.store.buyers().remove_tag(now_utc(), id, args.tag.trim())?;

    if ctx.json {
        print_json(&serde_json::json!({ "id": id, "tags": buyer.tags }))?;
    } else {
        println!("tag removed from {}", id);
    }
    Ok(())
}

pub fn list_tags(ctx: &Context<'_>, _args: TagListArgs) -> Result<()> {
    let tags = ctx.store.tags().list_all()?;
    let items: Vec<TagDto> = tags
        .into_iter()
        .map(|tag| TagDto {
            name: tag.name,
            color: tag.color,
            protected: tag.is_protected,
            usage_count: tag.usage_count,
        })
        .collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no tags");
        return Ok(());
    }

    for item in items {
        let protected = if item.protected { " (protected)" } else { "" };
        println!("{} ({}){}", item.name, item.usage_count, protected);
    }
    Ok(())
}

pub fn delete_tag(ctx: &Context<'_>, args: TagDeleteArgs) -> Result<()> {
    let label = args.tag.trim();
    ctx.store.tags().delete(label)?;
    if ctx.json {
        print_json(&serde_json::json!({ "deleted": label }))?;
    } else {
        println!("deleted tag {}", label);
    }
    Ok(())
}
