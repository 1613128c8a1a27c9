use anyhow::Result;
use farmhand_config::AppConfig;
use farmhand_store::Store;
use serde::Serialize;
use std::io::{self, Write};

pub mod buyers;
pub mod completions;
pub mod dashboard;
pub mod groups;
pub mod import;
pub mod sellers;
pub mod tags;
pub mod tui;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
