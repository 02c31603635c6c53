use anyhow::{bail, Result};

use super::{goal, habit};
use super::{require_title, DeleteResult};
use crate::helpers::not_found;
use crate::models::{NewTask, Task, TaskPatch, TaskStatus, MAX_PROGRESS};
use crate::store::Store;

pub(crate) fn task_ids(store: &Store) -> Vec<String> {
    store.tasks().into_iter().map(|t| t.id).collect()
}

fn check_progress(progress: u8) -> Result<()> {
    if progress > MAX_PROGRESS {
        bail!("Progress must be at most {MAX_PROGRESS}, got {progress}");
    }
    Ok(())
}

fn check_hours(label: &str, hours: Option<f64>) -> Result<()> {
    match hours {
        Some(h) if !h.is_finite() || h < 0.0 => bail!("{label} must be a non-negative number"),
        _ => Ok(()),
    }
}

/// Validate goal/habit links. A task linked to a habit must also be linked to
/// that habit's goal; when only the habit is given, its goal is filled in.
fn resolve_links(
    goal_id: Option<String>,
    habit_id: Option<String>,
    store: &Store,
) -> Result<(Option<String>, Option<String>)> {
    if let Some(goal_id) = &goal_id {
        goal::find(goal_id, store)?;
    }

    let Some(habit_id) = habit_id else {
        return Ok((goal_id, None));
    };
    let habit = habit::find(&habit_id, store)?;

    match goal_id {
        Some(goal_id) if goal_id != habit.goal_id => bail!(
            "Habit {} belongs to goal {}, not {}",
            habit.id,
            habit.goal_id,
            goal_id
        ),
        _ => Ok((Some(habit.goal_id), Some(habit.id))),
    }
}

pub fn create(mut new: NewTask, store: &mut Store) -> Result<Task> {
    require_title(&new.title)?;
    check_progress(new.progress)?;
    check_hours("Estimate", new.estimated_hours)?;
    check_hours("Spent hours", new.spent_hours)?;

    let (goal_id, habit_id) = resolve_links(new.goal_id.take(), new.habit_id.take(), store)?;
    new.goal_id = goal_id;
    new.habit_id = habit_id;

    let task = store.create_task(new);
    tracing::debug!(id = %task.id, status = %task.status, "created task");
    Ok(task)
}

pub fn list(goal_id: Option<String>, habit_id: Option<String>, store: &Store) -> Result<Vec<Task>> {
    let mut tasks = match &goal_id {
        Some(goal_id) => store.tasks_by_goal(&goal::find(goal_id, store)?.id),
        None => store.tasks(),
    };

    if let Some(habit_id) = habit_id {
        let habit = habit::find(&habit_id, store)?;
        tasks.retain(|t| t.habit_id.as_deref() == Some(habit.id.as_str()));
    }

    Ok(tasks)
}

pub fn update(task_id: &str, mut patch: TaskPatch, store: &mut Store) -> Result<Task> {
    let current = store
        .task(task_id)
        .ok_or_else(|| not_found("Task", task_id, &task_ids(store)))?;

    if let Some(title) = &patch.title {
        require_title(title)?;
    }
    if let Some(progress) = patch.progress {
        check_progress(progress)?;
    }
    check_hours("Estimate", patch.estimated_hours.flatten())?;
    check_hours("Spent hours", patch.spent_hours.flatten())?;

    if patch.goal_id.is_some() || patch.habit_id.is_some() {
        let goal_id = patch.goal_id.take().unwrap_or(current.goal_id);
        let habit_id = patch.habit_id.take().unwrap_or(current.habit_id);
        let (goal_id, habit_id) = resolve_links(goal_id, habit_id, store)?;
        patch.goal_id = Some(goal_id);
        patch.habit_id = Some(habit_id);
    }

    store
        .update_task(task_id, patch)
        .ok_or_else(|| not_found("Task", task_id, &task_ids(store)))
}

/// Move a task to another board column.
pub fn move_to(task_id: &str, status: TaskStatus, store: &mut Store) -> Result<Task> {
    update(task_id, TaskPatch::status(status), store)
}

pub fn delete(ids: Vec<String>, store: &mut Store) -> DeleteResult {
    let deleted = store.delete_tasks(&ids);

    tracing::debug!(deleted, "deleted tasks");
    DeleteResult {
        requested: ids.len(),
        deleted,
    }
}
