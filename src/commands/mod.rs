#![allow(clippy::needless_pass_by_value)]

pub mod goal;
pub mod habit;
pub mod init;
pub mod status;
pub mod task;

use anyhow::{bail, Result};
use serde::Serialize;

/// Outcome of a multi-id delete. Unknown ids are skipped, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    pub requested: usize,
    pub deleted: usize,
}

fn require_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Title cannot be empty");
    }
    Ok(())
}
