use anyhow::{bail, Result};
use serde::Serialize;

use super::{require_title, DeleteResult};
use crate::helpers::not_found;
use crate::models::{Goal, GoalPatch, Habit, NewGoal, Task};
use crate::store::Store;

/// A goal together with everything that feeds its progress.
#[derive(Debug, Serialize)]
pub struct GoalDetail {
    #[serde(flatten)]
    pub goal: Goal,
    pub habits: Vec<Habit>,
    pub tasks: Vec<Task>,
}

pub(crate) fn goal_ids(store: &Store) -> Vec<String> {
    store.goals().into_iter().map(|g| g.id).collect()
}

pub(crate) fn find(goal_id: &str, store: &Store) -> Result<Goal> {
    store
        .goal(goal_id)
        .ok_or_else(|| not_found("Goal", goal_id, &goal_ids(store)))
}

fn check_dates(goal: &NewGoal) -> Result<()> {
    if let (Some(start), Some(end)) = (goal.start, goal.end) {
        if end < start {
            bail!("End date {end} is before start date {start}");
        }
    }
    Ok(())
}

pub fn create(new: NewGoal, store: &mut Store) -> Result<Goal> {
    require_title(&new.title)?;
    check_dates(&new)?;

    let goal = store.create_goal(new);
    tracing::debug!(id = %goal.id, "created goal");
    Ok(goal)
}

pub fn list(store: &Store) -> Vec<Goal> {
    store.goals()
}

pub fn show(goal_id: &str, store: &Store) -> Result<GoalDetail> {
    let goal = find(goal_id, store)?;
    Ok(GoalDetail {
        habits: store.habits_by_goal(&goal.id),
        tasks: store.tasks_by_goal(&goal.id),
        goal,
    })
}

pub fn update(goal_id: &str, patch: GoalPatch, store: &mut Store) -> Result<Goal> {
    let current = find(goal_id, store)?;

    if let Some(title) = &patch.title {
        require_title(title)?;
    }
    check_dates(&NewGoal {
        title: String::new(),
        description: None,
        start: patch.start.unwrap_or(current.start),
        end: patch.end.unwrap_or(current.end),
        status: current.status,
    })?;

    store
        .update_goal(goal_id, patch)
        .ok_or_else(|| not_found("Goal", goal_id, &goal_ids(store)))
}

pub fn delete(ids: Vec<String>, store: &mut Store) -> DeleteResult {
    let habits_before = store.habits().len();
    let tasks_before = store.tasks().len();

    let deleted = store.delete_goals(&ids);

    tracing::debug!(
        deleted,
        habits = habits_before - store.habits().len(),
        tasks = tasks_before - store.tasks().len(),
        "deleted goals"
    );
    DeleteResult {
        requested: ids.len(),
        deleted,
    }
}
