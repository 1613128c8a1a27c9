use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{
    format_timestamp_date, normalize_optional_value, now_utc, parse_buyer_id,
    parse_local_timestamp, split_labels,
};
use anyhow::Result;
use clap::{ArgAction, Args};
use farmhand_core::domain::BuyerStatus;
use farmhand_core::dto::{BuyerDetailDto, BuyerListItemDto};
use farmhand_core::filter::{
    filter_buyers, parse_score_bound, FilterState, QuickFilter, SmartGroup, Toggle,
};
use farmhand_store::repo::{BuyerNew, BuyerUpdate};

#[derive(Debug, Args)]
pub struct AddBuyerArgs {
    #[arg(long)]
    pub fname: Option<String>,
    #[arg(long)]
    pub lname: Option<String>,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub score: i64,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub mailing_address: Option<String>,
    #[arg(long)]
    pub mailing_city: Option<String>,
    #[arg(long)]
    pub mailing_state: Option<String>,
    #[arg(long)]
    pub mailing_zip: Option<String>,
    #[arg(long, value_name = "LOCATION")]
    pub location: Vec<String>,
    #[arg(long, value_name = "TAG")]
    pub tag: Vec<String>,
    #[arg(long, value_name = "TYPE")]
    pub property_type: Vec<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub vip: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    pub vetted: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_email: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_sms: bool,
}

#[derive(Debug, Args)]
pub struct EditBuyerArgs {
    pub id: String,
    #[arg(long)]
    pub fname: Option<String>,
    #[arg(long)]
    pub lname: Option<String>,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub score: Option<i64>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub mailing_city: Option<String>,
    #[arg(long)]
    pub mailing_state: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Replaces the whole tag list; comma-separated.
    #[arg(long)]
    pub tags: Option<String>,
    /// Replaces the whole location list; comma-separated.
    #[arg(long)]
    pub locations: Option<String>,
    #[arg(long)]
    pub vip: Option<bool>,
    #[arg(long)]
    pub vetted: Option<bool>,
    #[arg(long)]
    pub can_email: Option<bool>,
    #[arg(long)]
    pub can_sms: Option<bool>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Substring match over name, email, phones, and company.
    #[arg(long)]
    pub search: Option<String>,
    /// Required tag; repeat to require several (each must match).
    #[arg(long, value_name = "TAG")]
    pub tag: Vec<String>,
    /// Excluded tag; any match hides the buyer.
    #[arg(long, value_name = "TAG")]
    pub exclude_tag: Vec<String>,
    /// Required location; repeat for alternatives (any may match).
    #[arg(long, value_name = "LOCATION")]
    pub location: Vec<String>,
    /// Required property type; repeat for alternatives (any may match).
    #[arg(long, value_name = "TYPE")]
    pub property_type: Vec<String>,
    /// Empty or non-numeric means no lower bound.
    #[arg(long, value_name = "SCORE")]
    pub min_score: Option<String>,
    #[arg(long, value_name = "SCORE")]
    pub max_score: Option<String>,
    #[arg(long, value_name = "DATE")]
    pub created_after: Option<String>,
    #[arg(long, value_name = "DATE")]
    pub created_before: Option<String>,
    #[arg(long, default_value = "any")]
    pub vip: Toggle,
    #[arg(long, default_value = "any")]
    pub vetted: Toggle,
    #[arg(long, default_value = "any")]
    pub can_email: Toggle,
    #[arg(long, default_value = "any")]
    pub can_sms: Toggle,
    /// Quick filter key: vip, high-score, hot, new. Repeatable.
    #[arg(long, value_name = "KEY")]
    pub quick: Vec<QuickFilter>,
    /// Smart group key, e.g. vip, hot, cash-buyer.
    #[arg(long, value_name = "KEY")]
    pub group: Option<SmartGroup>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

pub fn add_buyer(ctx: &Context<'_>, args: AddBuyerArgs) -> Result<()> {
    let now = now_utc();
    let tags = args.tag;
    let buyer = ctx.store.buyers().create(
        now,
        BuyerNew {
            fname: args.fname,
            lname: args.lname,
            full_name: args.full_name,
            email: args.email,
            phone: args.phone,
            company: args.company,
            score: args.score,
            notes: args.notes,
            mailing_address: args.mailing_address,
            mailing_city: args.mailing_city,
            mailing_state: args.mailing_state,
            mailing_zip: args.mailing_zip,
            locations: args.location,
            property_type: args.property_type,
            vetted: args.vetted,
            vip: args.vip,
            can_receive_email: !args.no_email,
            can_receive_sms: !args.no_sms,
            status: BuyerStatus::parse(args.status.as_deref().unwrap_or_default()),
            ..Default::default()
        },
    )?;

    // Tags go through the catalog path so usage counters stay in step.
    let mut buyer = buyer;
    for tag in tags {
        buyer = ctx.store.buyers().add_tag(now, buyer.id, &tag)?;
    }

    if ctx.json {
        print_json(&buyer)?;
    } else {
        println!("created {} {}", buyer.id, buyer.display_name());
    }
    Ok(())
}

pub fn edit_buyer(ctx: &Context<'_>, args: EditBuyerArgs) -> Result<()> {
    let now = now_utc();
    let id = parse_buyer_id(&args.id)?;

    let mut update = BuyerUpdate::default();
    if let Some(value) = args.fname {
        update.fname = Some(normalize_optional_value(value));
    }
    if let Some(value) = args.lname {
        update.lname = Some(normalize_optional_value(value));
    }
    if let Some(value) = args.full_name {
        update.full_name = Some(normalize_optional_value(value));
    }
    if let Some(value) = args.email {
        update.email = Some(normalize_optional_value(value));
    }
    if let Some(value) = args.phone {
        update.phone = Some(normalize_optional_value(value));
    }
    if let Some(value) = args.company {
        update.company = Some(normalize_optional_value(value));
    }
    if let Some(value) = args.score {
        update.score = Some(value);
    }
    if let Some(value) = args.notes {
        update.notes = Some(normalize_optional_value(value));
    }
    if let Some(value) = args.mailing_city {
        update.mailing_city = Some(normalize_optional_value(value));
    }
    if let Some(value) = args.mailing_state {
        update.mailing_state = Some(normalize_optional_value(value));
    }
    if let Some(value) = args.status {
        update.status = Some(BuyerStatus::parse(&value));
    }
    if let Some(value) = args.tags {
        update.tags = Some(split_labels(&value));
    }
    if let Some(value) = args.locations {
        update.locations = Some(split_labels(&value));
    }
    if let Some(value) = args.vip {
        update.vip = Some(value);
    }
    if let Some(value) = args.vetted {
        update.vetted = Some(value);
    }
    if let Some(value) = args.can_email {
        update.can_receive_email = Some(value);
    }
    if let Some(value) = args.can_sms {
        update.can_receive_sms = Some(value);
    }

    if update.is_empty() {
        return Err(invalid_input("no updates provided"));
    }

    let buyer = ctx.store.buyers().update(now, id, update)?;
    if ctx.json {
        print_json(&buyer)?;
    } else {
        println!("updated {} {}", buyer.id, buyer.display_name());
    }
    Ok(())
}

pub fn show_buyer(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_buyer_id(&args.id)?;
    let buyer = ctx
        .store
        .buyers()
        .get(id)?
        .ok_or_else(|| not_found("buyer not found"))?;
    let groups = ctx.store.groups().names_for_buyer(buyer.id)?;

    let detail = BuyerDetailDto {
        id: buyer.id,
        display_name: buyer.display_name(),
        fname: buyer.fname.clone(),
        lname: buyer.lname.clone(),
        full_name: buyer.full_name.clone(),
        email: buyer.email.clone(),
        phone: buyer.phone.clone(),
        phone2: buyer.phone2.clone(),
        phone3: buyer.phone3.clone(),
        company: buyer.company.clone(),
        score: buyer.score,
        notes: buyer.notes.clone(),
        mailing_address: buyer.mailing_address.clone(),
        mailing_city: buyer.mailing_city.clone(),
        mailing_state: buyer.mailing_state.clone(),
        mailing_zip: buyer.mailing_zip.clone(),
        locations: buyer.locations.clone(),
        tags: buyer.tags.clone(),
        vetted: buyer.vetted,
        vip: buyer.vip,
        can_receive_sms: buyer.can_receive_sms,
        can_receive_email: buyer.can_receive_email,
        property_type: buyer.property_type.clone(),
        budget_min: buyer.budget_min,
        budget_max: buyer.budget_max,
        timeline: buyer.timeline.clone(),
        source: buyer.source.clone(),
        status: buyer.status.as_str().to_string(),
        created_at: buyer.created_at,
        updated_at: buyer.updated_at,
        groups,
    };

    if ctx.json {
        print_json(&detail)?;
        return Ok(());
    }

    println!("id: {}", detail.id);
    println!("name: {}", detail.display_name);
    if let Some(email) = detail.email.as_deref() {
        println!("email: {}", email);
    }
    for phone in [
        detail.phone.as_deref(),
        detail.phone2.as_deref(),
        detail.phone3.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        println!("phone: {}", phone);
    }
    if let Some(company) = detail.company.as_deref() {
        println!("company: {}", company);
    }
    println!("score: {}", detail.score);
    println!("status: {}", detail.status);
    println!(
        "flags: vip={} vetted={} email={} sms={}",
        detail.vip, detail.vetted, detail.can_receive_email, detail.can_receive_sms
    );
    if !detail.tags.is_empty() {
        println!("tags: {}", detail.tags.join(", "));
    }
    if !detail.locations.is_empty() {
        println!("locations: {}", detail.locations.join(", "));
    }
    if !detail.property_type.is_empty() {
        println!("property types: {}", detail.property_type.join(", "));
    }
    if let (Some(min), Some(max)) = (detail.budget_min, detail.budget_max) {
        println!("budget: {} - {}", min, max);
    }
    if let Some(notes) = detail.notes.as_deref() {
        println!("notes: {}", notes);
    }
    if !detail.groups.is_empty() {
        println!("groups: {}", detail.groups.join(", "));
    }
    println!("created: {}", format_timestamp_date(detail.created_at));
    Ok(())
}

pub fn list_buyers(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let state = filter_state_from_args(&args)?;
    let now = now_utc();

    let buyers = ctx.store.buyers().list_all()?;
    let visible = filter_buyers(&buyers, &state, now);

    let items: Vec<BuyerListItemDto> = visible
        .iter()
        .map(|buyer| BuyerListItemDto {
            id: buyer.id,
            display_name: buyer.display_name(),
            email: buyer.email.clone(),
            phone: buyer.phone.clone(),
            score: buyer.score,
            status: buyer.status.as_str().to_string(),
            vip: buyer.vip,
            vetted: buyer.vetted,
            tags: buyer.tags.clone(),
            created_at: buyer.created_at,
        })
        .collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no buyers");
        return Ok(());
    }

    for item in &items {
        let tags = if item.tags.is_empty() {
            String::new()
        } else {
            format!(
                "  {}",
                item.tags
                    .iter()
                    .map(|tag| format!("#{}", tag))
                    .collect::<Vec<_>>()
                    .join(" ")
            )
        };
        let vip = if item.vip { " *vip*" } else { "" };
        println!(
            "{}  {}  [{}] {}{}{}",
            item.id, item.display_name, item.score, item.status, vip, tags
        );
    }

    if !state.is_empty() {
        println!(
            "{} of {} buyers ({} filters applied)",
            items.len(),
            buyers.len(),
            state.active_count()
        );
    }
    Ok(())
}

pub fn delete_buyer(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_buyer_id(&args.id)?;
    ctx.store.buyers().delete(id)?;
    if ctx.json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

fn filter_state_from_args(args: &ListArgs) -> Result<FilterState> {
    let created_after = match args.created_after.as_deref() {
        Some(value) => Some(parse_local_timestamp(value)?),
        None => None,
    };
    let created_before = match args.created_before.as_deref() {
        Some(value) => Some(parse_local_timestamp(value)?),
        None => None,
    };

    Ok(FilterState {
        search: args.search.clone().unwrap_or_default(),
        tags: args.tag.clone(),
        exclude_tags: args.exclude_tag.clone(),
        locations: args.location.clone(),
        property_types: args.property_type.clone(),
        min_score: args.min_score.as_deref().and_then(parse_score_bound),
        max_score: args.max_score.as_deref().and_then(parse_score_bound),
        created_after,
        created_before,
        vip: args.vip,
        vetted: args.vetted,
        can_email: args.can_email,
        can_sms: args.can_sms,
        quick: args.quick.clone(),
        smart_group: args.group,
    })
}
