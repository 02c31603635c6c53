use anyhow::{bail, Result};

use super::goal;
use super::{require_title, DeleteResult};
use crate::helpers::not_found;
use crate::models::{Habit, HabitPatch, NewHabit, TaskPatch};
use crate::store::Store;

pub(crate) fn habit_ids(store: &Store) -> Vec<String> {
    store.habits().into_iter().map(|h| h.id).collect()
}

pub(crate) fn find(habit_id: &str, store: &Store) -> Result<Habit> {
    store
        .habit(habit_id)
        .ok_or_else(|| not_found("Habit", habit_id, &habit_ids(store)))
}

fn require_target(target: u32) -> Result<()> {
    if target == 0 {
        bail!("Target per period must be at least 1");
    }
    Ok(())
}

pub fn create(new: NewHabit, store: &mut Store) -> Result<Habit> {
    require_title(&new.title)?;
    require_target(new.target_per_period)?;
    goal::find(&new.goal_id, store)?;

    let habit = store.create_habit(new);
    tracing::debug!(id = %habit.id, goal = %habit.goal_id, "created habit");
    Ok(habit)
}

pub fn list(goal_id: Option<String>, store: &Store) -> Result<Vec<Habit>> {
    match goal_id {
        Some(goal_id) => {
            let goal = goal::find(&goal_id, store)?;
            Ok(store.habits_by_goal(&goal.id))
        }
        None => Ok(store.habits()),
    }
}

pub fn update(habit_id: &str, patch: HabitPatch, store: &mut Store) -> Result<Habit> {
    let previous = find(habit_id, store)?;

    if let Some(title) = &patch.title {
        require_title(title)?;
    }
    if let Some(target) = patch.target_per_period {
        require_target(target)?;
    }
    if let Some(goal_id) = &patch.goal_id {
        goal::find(goal_id, store)?;
    }

    let habit = store
        .update_habit(habit_id, patch)
        .ok_or_else(|| not_found("Habit", habit_id, &habit_ids(store)))?;

    // Linked tasks follow the habit to its new goal.
    if habit.goal_id != previous.goal_id {
        let linked = store.tasks_by_habit(&habit.id);
        let repoint = TaskPatch {
            goal_id: Some(Some(habit.goal_id.clone())),
            ..TaskPatch::default()
        };
        for task in &linked {
            store.update_task(&task.id, repoint.clone());
        }
        tracing::debug!(
            habit = %habit.id,
            goal = %habit.goal_id,
            tasks = linked.len(),
            "moved habit to another goal"
        );
    }

    Ok(habit)
}

pub fn done(habit_id: &str, store: &mut Store) -> Result<Habit> {
    store
        .mark_habit_done(habit_id)
        .ok_or_else(|| not_found("Habit", habit_id, &habit_ids(store)))
}

pub fn reset(habit_id: &str, store: &mut Store) -> Result<Habit> {
    store
        .reset_habit_cycle(habit_id)
        .ok_or_else(|| not_found("Habit", habit_id, &habit_ids(store)))
}

pub fn delete(ids: Vec<String>, store: &mut Store) -> DeleteResult {
    let tasks_before = store.tasks().len();
    let deleted = store.delete_habits(&ids);

    let tasks = tasks_before - store.tasks().len();
    tracing::debug!(deleted, tasks, "deleted habits");
    DeleteResult {
        requested: ids.len(),
        deleted,
    }
}
