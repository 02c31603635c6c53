use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::models::{Goal, Habit, Task};
use crate::store::Store;

pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// Serialized form of a store's three collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Snapshot {
    pub fn from_store(store: &Store) -> Self {
        Self {
            goals: store.goals(),
            habits: store.habits(),
            tasks: store.tasks(),
        }
    }

    /// Build a store from this snapshot. Progress is recomputed on the way in.
    pub fn into_store(self) -> Store {
        Store::from_parts(self.goals, self.habits, self.tasks)
    }

    /// Read the snapshot stored in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SNAPSHOT_FILE);
        if !path.exists() {
            bail!("Snapshot file does not exist: {}", path.display());
        }

        let file = File::open(&path).context("Failed to open snapshot.json")?;
        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!(
            goals = snapshot.goals.len(),
            habits = snapshot.habits.len(),
            tasks = snapshot.tasks.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Write the snapshot to `dir` atomically.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let temp_path = dir.join("snapshot.json.tmp");
        let final_path = dir.join(SNAPSHOT_FILE);

        let mut file =
            File::create(&temp_path).context("Failed to create temporary snapshot file")?;

        file.lock_exclusive()
            .context("Failed to acquire lock on snapshot file")?;

        serde_json::to_writer_pretty(&mut file, self)?;
        writeln!(file)?;

        file.sync_all().context("Failed to sync snapshot file")?;
        file.unlock().context("Failed to unlock snapshot file")?;

        fs::rename(&temp_path, &final_path).context("Failed to rename snapshot file")?;

        tracing::debug!(path = %final_path.display(), "saved snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewGoal, NewHabit};
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = Store::seeded();

        Snapshot::from_store(&store).save(dir.path()).unwrap();
        let loaded = Snapshot::load(dir.path()).unwrap();

        assert_eq!(loaded, Snapshot::from_store(&store));
        assert!(!dir.path().join("snapshot.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Snapshot::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SNAPSHOT_FILE), "{ not json").unwrap();
        assert!(Snapshot::load(dir.path()).is_err());
    }

    #[test]
    fn test_into_store_recomputes_progress() {
        let mut store = Store::new();
        let goal = store.create_goal(NewGoal::new("Stay hydrated"));
        store.create_habit(NewHabit {
            completed_in_period: 6,
            ..NewHabit::new(goal.id.clone(), "Drink 8 glasses", 8)
        });

        let mut snapshot = Snapshot::from_store(&store);
        snapshot.goals[0].progress = 0;
        snapshot.habits[0].progress = 0;

        let restored = snapshot.into_store();
        assert_eq!(restored.habits()[0].progress, 75);
        assert_eq!(restored.goal(&goal.id).unwrap().progress, 75);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"goals": []}"#).unwrap();
        assert!(snapshot.habits.is_empty());
        assert!(snapshot.tasks.is_empty());
    }
}
