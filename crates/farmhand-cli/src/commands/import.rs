use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::now_utc;
use anyhow::{Context as _, Result};
use clap::{ArgAction, Args, Subcommand};
use farmhand_config::DedupeBy;
use farmhand_core::domain::BuyerStatus;
use farmhand_import::{
    template_csv, BuyerDraft, BuyerSink, DedupePolicy, ImportError, ImportOptions, ImportSession,
    Mapping,
};
use farmhand_store::repo::{BuyerNew, BuyersRepo};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum ImportCommand {
    /// Import buyers from a CSV file
    Csv(ImportCsvArgs),
    /// Emit the import template header row
    Template(TemplateArgs),
}

#[derive(Debug, Args)]
pub struct ImportCsvArgs {
    pub file: PathBuf,
    /// Map a target field to a source column, e.g. --map "Score=My Score".
    #[arg(long = "map", value_name = "FIELD=COLUMN")]
    pub map: Vec<String>,
    /// Match source headers against the template labels.
    #[arg(long, action = ArgAction::SetTrue)]
    pub auto_map: bool,
    /// Coerce and report without touching the store.
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,
    #[arg(long)]
    pub batch_size: Option<usize>,
}

#[derive(Debug, Args)]
pub struct TemplateArgs {
    #[arg(long)]
    pub out: Option<PathBuf>,
}

struct StoreSink<'a> {
    repo: BuyersRepo<'a>,
    now: i64,
}

impl BuyerSink for StoreSink<'_> {
    fn insert_batch(&mut self, batch: &[BuyerDraft]) -> Result<(), ImportError> {
        let inputs = batch.iter().cloned().map(draft_to_new).collect();
        self.repo
            .insert_batch(self.now, inputs)
            .map(|_| ())
            .map_err(|err| ImportError::Store(err.to_string()))
    }
}

pub fn import_csv(ctx: &Context<'_>, args: ImportCsvArgs) -> Result<()> {
    let mut session = ImportSession::new();
    let file = fs::File::open(&args.file)
        .with_context(|| format!("open csv file {}", args.file.display()))?;
    session.load(file)?;
    let headers: Vec<String> = session.headers().unwrap_or_default().to_vec();
    let row_count = session.row_count();

    let mapping = build_mapping(&args, &headers)?;
    let mapped_fields = mapping.len();
    session.set_mapping(mapping)?;

    if args.dry_run {
        let records = session.preview()?;
        if ctx.json {
            print_json(&serde_json::json!({
                "rows": row_count,
                "mapped_fields": mapped_fields,
                "would_import": records.len(),
            }))?;
        } else {
            println!(
                "parsed {} rows, {} fields mapped; would import {} buyers",
                row_count,
                mapped_fields,
                records.len()
            );
        }
        return Ok(());
    }

    let options = import_options(ctx, args.batch_size)?;
    let mut sink = StoreSink {
        repo: ctx.store.buyers(),
        now: now_utc(),
    };

    let json = ctx.json;
    let report = session
        .run(&mut sink, &options, |percent| {
            if !json {
                println!("importing... {}%", percent);
            }
        })
        .map_err(|err| {
            if matches!(err, ImportError::Store(_)) {
                // Batches before the failure stay persisted; nothing after
                // the failing batch was attempted.
                eprintln!(
                    "note: the import stopped at a failed batch; earlier batches remain in the store"
                );
            }
            err
        })?;

    if ctx.json {
        print_json(&report)?;
        return Ok(());
    }

    println!(
        "Imported {} of {} rows in {} batches",
        report.inserted, report.total_rows, report.batches
    );
    if report.skipped_duplicates > 0 {
        println!("Skipped {} duplicate rows", report.skipped_duplicates);
    }
    Ok(())
}

pub fn write_template(ctx: &Context<'_>, args: TemplateArgs) -> Result<()> {
    let template = template_csv();
    match args.out {
        Some(path) => {
            fs::write(&path, &template)
                .with_context(|| format!("write template {}", path.display()))?;
            if ctx.json {
                print_json(&serde_json::json!({ "output": path.display().to_string() }))?;
            } else {
                println!("wrote template to {}", path.display());
            }
        }
        None => {
            print!("{}", template);
        }
    }
    Ok(())
}

fn build_mapping(args: &ImportCsvArgs, headers: &[String]) -> Result<Mapping> {
    if args.auto_map && !args.map.is_empty() {
        return Err(invalid_input("use either --auto-map or --map, not both"));
    }
    if args.auto_map {
        return Ok(Mapping::auto(headers));
    }
    if args.map.is_empty() {
        return Err(invalid_input(
            "no mapping provided: pass --auto-map or at least one --map",
        ));
    }

    let mut pairs = Vec::with_capacity(args.map.len());
    for raw in &args.map {
        let (field, column) = raw
            .split_once('=')
            .ok_or_else(|| invalid_input(format!("invalid --map value: {raw}")))?;
        pairs.push((field.trim().to_string(), column.trim().to_string()));
    }
    Ok(Mapping::resolve(&pairs, headers)?)
}

fn import_options(ctx: &Context<'_>, batch_size: Option<usize>) -> Result<ImportOptions> {
    let batch_size = match batch_size {
        Some(0) => return Err(invalid_input("batch size must be positive")),
        Some(value) => value,
        None => ctx.config.import.batch_size,
    };

    let mut options = ImportOptions::new(batch_size);
    options.dedupe = match ctx.config.import.dedupe_by {
        DedupeBy::None => DedupePolicy::None,
        DedupeBy::Email => DedupePolicy::Email,
        DedupeBy::Phone => DedupePolicy::Phone,
    };
    let existing = match options.dedupe {
        DedupePolicy::None => Vec::new(),
        DedupePolicy::Email => ctx.store.buyers().existing_emails()?,
        DedupePolicy::Phone => ctx.store.buyers().existing_phones()?,
    };
    options.existing_keys = existing
        .into_iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect();
    Ok(options)
}

fn draft_to_new(draft: BuyerDraft) -> BuyerNew {
    BuyerNew {
        fname: draft.fname,
        lname: draft.lname,
        full_name: None,
        email: draft.email,
        phone: draft.phone,
        phone2: draft.phone2,
        phone3: draft.phone3,
        company: draft.company,
        score: draft.score.unwrap_or(0),
        notes: draft.notes,
        mailing_address: draft.mailing_address,
        mailing_city: draft.mailing_city,
        mailing_state: draft.mailing_state,
        mailing_zip: draft.mailing_zip,
        locations: draft.locations.unwrap_or_default(),
        tags: draft.tags.unwrap_or_default(),
        vetted: draft.vetted.unwrap_or(false),
        vip: draft.vip.unwrap_or(false),
        can_receive_sms: draft.can_receive_sms.unwrap_or(true),
        can_receive_email: draft.can_receive_email.unwrap_or(true),
        property_type: draft.property_type.unwrap_or_default(),
        budget_min: draft.budget_min,
        budget_max: draft.budget_max,
        timeline: draft.timeline,
        source: draft.source,
        status: BuyerStatus::parse(draft.status.as_deref().unwrap_or_default()),
    }
}
