use anyhow::{anyhow, Context as _, Result};
use clap::Args;
use farmhand_store::paths;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Args)]
pub struct TuiArgs {}

pub fn launch(
    db_path: Option<PathBuf>,
    _config_path: Option<PathBuf>,
    _args: TuiArgs,
    verbose: bool,
) -> Result<()> {
    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    if verbose {
        eprintln!("db: {}", db_path.display());
    }
    let command = build_command(&db_path);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let mut command = command;
        let err = command.exec();
        Err(exec_error(err))
    }

    #[cfg(not(unix))]
    {
        let mut command = command;
        let status = command.status().with_context(|| "launch farmhand-tui")?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

fn build_command(db_path: &Path) -> Command {
    let binary = find_tui_binary();
    let mut command = Command::new(binary);
    command.arg("--db-path").arg(db_path);
    command
}

fn find_tui_binary() -> PathBuf {
    let name = format!("farmhand-tui{}", env::consts::EXE_SUFFIX);
    if let Ok(current) = env::current_exe() {
        if let Some(dir) = current.parent() {
            let candidate = dir.join(&name);
            if candidate.is_file() {
                return candidate;
            }
        }
    }
    PathBuf::from(name)
}

#[cfg(unix)]
fn exec_error(err: std::io::Error) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        return anyhow!(
            "farmhand-tui binary not found; build it with `cargo build -p farmhand-tui` or install the package"
        );
    }
    anyhow!("launch farmhand-tui failed: {}", err)
}
