use crate::commands::{print_json, Context};
use crate::util::now_utc;
use anyhow::Result;
use clap::Args;
use farmhand_core::dto::SellerListItemDto;
use farmhand_store::repo::SellerNew;

#[derive(Debug, Args)]
pub struct AddSellerArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub score: i64,
    #[arg(long)]
    pub property_address: Option<String>,
    #[arg(long)]
    pub asking_price: Option<i64>,
    #[arg(long)]
    pub timeline: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, value_name = "TAG")]
    pub tag: Vec<String>,
}

#[derive(Debug, Args)]
pub struct SellersArgs {}

pub fn add_seller(ctx: &Context<'_>, args: AddSellerArgs) -> Result<()> {
    let seller = ctx.store.sellers().create(
        now_utc(),
        SellerNew {
            name: args.name.trim().to_string(),
            email: args.email,
            phone: args.phone,
            score: args.score,
            property_address: args.property_address,
            asking_price: args.asking_price,
            timeline: args.timeline,
            status: args.status,
            tags: args.tag,
        },
    )?;

    if ctx.json {
        print_json(&seller)?;
    } else {
        println!("created seller {} {}", seller.id, seller.name);
    }
    Ok(())
}

pub fn list_sellers(ctx: &Context<'_>, _args: SellersArgs) -> Result<()> {
    let sellers = ctx.store.sellers().list_all()?;
    let items: Vec<SellerListItemDto> = sellers
        .iter()
        .map(|seller| SellerListItemDto {
            id: seller.id,
            name: seller.name.clone(),
            email: seller.email.clone(),
            property_address: seller.property_address.clone(),
            asking_price: seller.asking_price,
            timeline: seller.timeline.clone(),
            status: seller.status.clone(),
        })
        .collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no sellers");
        return Ok(());
    }

    for item in items {
        let price = item
            .asking_price
            .map(|value| format!("  ${}", value))
            .unwrap_or_default();
        let status = item
            .status
            .map(|value| format!("  [{}]", value))
            .unwrap_or_default();
        let property = item
            .property_address
            .map(|value| format!("  {}", value))
            .unwrap_or_default();
        println!("{}  {}{}{}{}", item.id, item.name, property, price, status);
    }
    Ok(())
}
