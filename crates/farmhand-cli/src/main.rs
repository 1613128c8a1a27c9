mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{
    buyers, completions, dashboard, groups, import, sellers, tags, tui, Context,
};
use crate::error::{exit_code_for, report_error};
use farmhand_config as config;
use farmhand_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "farmhand", version, about = "farmhand CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    #[command(name = "add-buyer")]
    AddBuyer(buyers::AddBuyerArgs),
    #[command(name = "edit-buyer")]
    EditBuyer(buyers::EditBuyerArgs),
    Show(buyers::ShowArgs),
    List(buyers::ListArgs),
    Delete(buyers::DeleteArgs),
    #[command(subcommand)]
    Tag(tags::TagCommand),
    #[command(subcommand)]
    Group(groups::GroupCommand),
    #[command(name = "add-seller")]
    AddSeller(sellers::AddSellerArgs),
    Sellers(sellers::SellersArgs),
    Dashboard(dashboard::DashboardArgs),
    #[command(subcommand)]
    Import(import::ImportCommand),
    Tui(tui::TuiArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Tui(args) => tui::launch(db_path, config_path, args, verbose),
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path.clone()) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }
            let db_path =
                paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;

            if verbose {
                debug!(path = %db_path.display(), "database path resolved");
            }

            let store = Store::open(&db_path)
                .with_context(|| format!("open database {}", db_path.display()))?;
            store.migrate().with_context(|| "run migrations")?;

            let ctx = Context {
                store: &store,
                json,
                config: &app_config,
            };

            match command {
                Command::AddBuyer(args) => buyers::add_buyer(&ctx, args),
                Command::EditBuyer(args) => buyers::edit_buyer(&ctx, args),
                Command::Show(args) => buyers::show_buyer(&ctx, args),
                Command::List(args) => buyers::list_buyers(&ctx, args),
                Command::Delete(args) => buyers::delete_buyer(&ctx, args),
                Command::Tag(cmd) => match cmd {
                    tags::TagCommand::Add(args) => tags::add_tag(&ctx, args),
                    tags::TagCommand::Rm(args) => tags::remove_tag(&ctx, args),
                    tags::TagCommand::Ls(args) => tags::list_tags(&ctx, args),
                    tags::TagCommand::Delete(args) => tags::delete_tag(&ctx, args),
                },
                Command::Group(cmd) => match cmd {
                    groups::GroupCommand::Create(args) => groups::create_group(&ctx, args),
                    groups::GroupCommand::Ls(args) => groups::list_groups(&ctx, args),
                    groups::GroupCommand::Rm(args) => groups::remove_group(&ctx, args),
                    groups::GroupCommand::AddBuyers(args) => groups::add_buyers(&ctx, args),
                    groups::GroupCommand::RmBuyer(args) => groups::remove_buyer(&ctx, args),
                    groups::GroupCommand::Members(args) => groups::list_members(&ctx, args),
                },
                Command::AddSeller(args) => sellers::add_seller(&ctx, args),
                Command::Sellers(args) => sellers::list_sellers(&ctx, args),
                Command::Dashboard(args) => dashboard::show_dashboard(&ctx, args),
                Command::Import(cmd) => match cmd {
                    import::ImportCommand::Csv(args) => import::import_csv(&ctx, args),
                    import::ImportCommand::Template(args) => import::write_template(&ctx, args),
                },
                Command::Tui(_) => unreachable!("tui command handled before store initialization"),
                Command::Completions(_) => {
                    unreachable!("completions command handled before store initialization")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
