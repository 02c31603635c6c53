use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::config::{Config, CONFIG_FILE};
use crate::snapshot::{Snapshot, SNAPSHOT_FILE};
use crate::store::Store;
use crate::GOALPOST_DIR;

#[derive(Debug, Serialize)]
pub struct InitResult {
    pub dir: PathBuf,
    pub goals: usize,
    pub habits: usize,
    pub tasks: usize,
}

pub fn run(empty: bool) -> Result<InitResult> {
    let current_dir = std::env::current_dir().context("Failed to read current directory")?;
    run_in(&current_dir, empty)
}

/// Create `.goalpost/` under `base`. An existing `config.toml` is kept.
pub fn run_in(base: &Path, empty: bool) -> Result<InitResult> {
    let dir = base.join(GOALPOST_DIR);

    if dir.join(SNAPSHOT_FILE).exists() {
        bail!("Goalpost already initialized in {}", dir.display());
    }

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let config = Config::load(&dir)?;
    if !dir.join(CONFIG_FILE).exists() {
        config.write(&dir)?;
    }

    let store = if config.seed.on_init && !empty {
        Store::seeded()
    } else {
        Store::new()
    };
    let snapshot = Snapshot::from_store(&store);
    snapshot.save(&dir)?;

    tracing::info!(
        dir = %dir.display(),
        seeded = !snapshot.goals.is_empty(),
        "initialized workspace"
    );

    Ok(InitResult {
        dir,
        goals: snapshot.goals.len(),
        habits: snapshot.habits.len(),
        tasks: snapshot.tasks.len(),
    })
}
