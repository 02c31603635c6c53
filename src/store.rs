use std::collections::HashSet;

use jiff::{SignedDuration, Timestamp};

use crate::id::{generate_id, IdKind};
use crate::models::{
    Goal, GoalPatch, Habit, HabitPatch, NewGoal, NewHabit, NewTask, Task, TaskPatch,
};
use crate::progress::{self, recompute_all, Recomputed};
use crate::seed;

/// In-memory owner of every goal, habit and task.
///
/// Every mutation runs a full progress recomputation before returning, so the
/// stored `progress` fields are never stale. Reads hand out clones; nothing a
/// caller does with a returned value reaches back into the store.
#[derive(Debug, Clone, Default)]
pub struct Store {
    goals: Vec<Goal>,
    habits: Vec<Habit>,
    tasks: Vec<Task>,
    /// Every id this store has handed out or loaded, deleted ones included.
    issued: HashSet<String>,
    last_stamp: Option<Timestamp>,
}

impl Store {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing collections.
    ///
    /// Habits whose goal is missing and tasks whose habit is missing are
    /// dropped, then progress is recomputed once.
    pub fn from_parts(goals: Vec<Goal>, habits: Vec<Habit>, tasks: Vec<Task>) -> Self {
        let goal_ids: HashSet<&str> = goals.iter().map(|g| g.id.as_str()).collect();
        let habits: Vec<Habit> = habits
            .into_iter()
            .filter(|h| goal_ids.contains(h.goal_id.as_str()))
            .collect();
        let habit_ids: HashSet<&str> = habits.iter().map(|h| h.id.as_str()).collect();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|t| match t.habit_id.as_deref() {
                Some(id) => habit_ids.contains(id),
                None => true,
            })
            .collect();

        let issued = goals
            .iter()
            .map(|g| g.id.clone())
            .chain(habits.iter().map(|h| h.id.clone()))
            .chain(tasks.iter().map(|t| t.id.clone()))
            .collect();

        let last_stamp = goals
            .iter()
            .map(|g| g.updated_at)
            .chain(habits.iter().map(|h| h.updated_at))
            .chain(tasks.iter().map(|t| t.updated_at))
            .max();

        let mut store = Self {
            goals,
            habits,
            tasks,
            issued,
            last_stamp,
        };
        let now = store.tick();
        store.recompute(now);
        store
    }

    /// A store loaded with the bootstrap dataset, dated around the local
    /// calendar day.
    pub fn seeded() -> Self {
        let data = seed::dataset(Timestamp::now(), progress::today());
        Self::from_parts(data.goals, data.habits, data.tasks)
    }

    /// Consume the store, returning its collections in insertion order.
    pub fn into_parts(self) -> (Vec<Goal>, Vec<Habit>, Vec<Task>) {
        (self.goals, self.habits, self.tasks)
    }

    /// Next timestamp, strictly after every timestamp this store handed out.
    fn tick(&mut self) -> Timestamp {
        let now = Timestamp::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last
                .checked_add(SignedDuration::from_nanos(1))
                .unwrap_or(last),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn recompute(&mut self, now: Timestamp) {
        let Recomputed {
            goals,
            habits,
            tasks,
        } = recompute_all(&self.goals, &self.habits, &self.tasks, now);
        self.goals = goals;
        self.habits = habits;
        self.tasks = tasks;
    }

    /// An id never issued before by this store, even if its owner is gone.
    fn fresh_id(&mut self, kind: IdKind) -> String {
        loop {
            let id = generate_id(kind);
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    // Goal operations

    pub fn goals(&self) -> Vec<Goal> {
        self.goals.clone()
    }

    pub fn goal(&self, id: &str) -> Option<Goal> {
        self.goals.iter().find(|g| g.id == id).cloned()
    }

    pub fn create_goal(&mut self, new: NewGoal) -> Goal {
        let now = self.tick();
        let id = self.fresh_id(IdKind::Goal);
        let index = self.goals.len();
        self.goals.push(new.into_goal(id, now));
        self.recompute(now);
        self.goals[index].clone()
    }

    pub fn update_goal(&mut self, id: &str, patch: GoalPatch) -> Option<Goal> {
        let index = self.goals.iter().position(|g| g.id == id)?;
        let now = self.tick();

        let goal = &mut self.goals[index];
        patch.apply(goal);
        goal.updated_at = now;

        self.recompute(now);
        Some(self.goals[index].clone())
    }

    /// Delete a goal along with its habits, the tasks linked to the goal and
    /// the tasks linked to any of the removed habits.
    pub fn delete_goal(&mut self, id: &str) -> bool {
        let Some(index) = self.goals.iter().position(|g| g.id == id) else {
            return false;
        };
        self.goals.remove(index);

        let removed_habits: HashSet<String> = self
            .habits
            .iter()
            .filter(|h| h.goal_id == id)
            .map(|h| h.id.clone())
            .collect();
        self.habits.retain(|h| h.goal_id != id);
        self.tasks.retain(|t| {
            let linked_to_goal = t.goal_id.as_deref() == Some(id);
            let linked_to_habit = t
                .habit_id
                .as_ref()
                .is_some_and(|h| removed_habits.contains(h));
            !linked_to_goal && !linked_to_habit
        });

        let now = self.tick();
        self.recompute(now);
        true
    }

    /// Delete each goal independently; returns how many existed.
    pub fn delete_goals<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let mut deleted = 0;
        for id in ids {
            if self.delete_goal(id.as_ref()) {
                deleted += 1;
            }
        }
        deleted
    }

    // Habit operations

    pub fn habits(&self) -> Vec<Habit> {
        self.habits.clone()
    }

    pub fn habits_by_goal(&self, goal_id: &str) -> Vec<Habit> {
        self.habits
            .iter()
            .filter(|h| h.goal_id == goal_id)
            .cloned()
            .collect()
    }

    pub fn habit(&self, id: &str) -> Option<Habit> {
        self.habits.iter().find(|h| h.id == id).cloned()
    }

    pub fn create_habit(&mut self, new: NewHabit) -> Habit {
        let now = self.tick();
        let id = self.fresh_id(IdKind::Habit);
        let index = self.habits.len();
        self.habits.push(new.into_habit(id, now));
        self.recompute(now);
        self.habits[index].clone()
    }

    pub fn update_habit(&mut self, id: &str, patch: HabitPatch) -> Option<Habit> {
        self.modify_habit(id, |habit| patch.apply(habit))
    }

    /// Record one more completion in the current period.
    pub fn mark_habit_done(&mut self, id: &str) -> Option<Habit> {
        self.modify_habit(id, |habit| {
            habit.completed_in_period = habit.completed_in_period.saturating_add(1);
        })
    }

    /// Start a new period with no completions.
    pub fn reset_habit_cycle(&mut self, id: &str) -> Option<Habit> {
        self.modify_habit(id, |habit| habit.completed_in_period = 0)
    }

    fn modify_habit(&mut self, id: &str, change: impl FnOnce(&mut Habit)) -> Option<Habit> {
        let index = self.habits.iter().position(|h| h.id == id)?;
        let now = self.tick();

        let habit = &mut self.habits[index];
        change(habit);
        habit.updated_at = now;

        self.recompute(now);
        Some(self.habits[index].clone())
    }

    /// Delete a habit and every task linked to it.
    pub fn delete_habit(&mut self, id: &str) -> bool {
        let Some(index) = self.habits.iter().position(|h| h.id == id) else {
            return false;
        };
        self.habits.remove(index);
        self.tasks.retain(|t| t.habit_id.as_deref() != Some(id));

        let now = self.tick();
        self.recompute(now);
        true
    }

    pub fn delete_habits<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let mut deleted = 0;
        for id in ids {
            if self.delete_habit(id.as_ref()) {
                deleted += 1;
            }
        }
        deleted
    }

    // Task operations

    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn tasks_by_goal(&self, goal_id: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.goal_id.as_deref() == Some(goal_id))
            .cloned()
            .collect()
    }

    pub fn tasks_by_habit(&self, habit_id: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.habit_id.as_deref() == Some(habit_id))
            .cloned()
            .collect()
    }

    pub fn task(&self, id: &str) -> Option<Task> {
        self.tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn create_task(&mut self, new: NewTask) -> Task {
        let now = self.tick();
        let id = self.fresh_id(IdKind::Task);
        let index = self.tasks.len();
        self.tasks.push(new.into_task(id, now));
        self.recompute(now);
        self.tasks[index].clone()
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let now = self.tick();

        let task = &mut self.tasks[index];
        patch.apply(task);
        task.updated_at = now;

        self.recompute(now);
        Some(self.tasks[index].clone())
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tasks.remove(index);

        let now = self.tick();
        self.recompute(now);
        true
    }

    pub fn delete_tasks<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let mut deleted = 0;
        for id in ids {
            if self.delete_task(id.as_ref()) {
                deleted += 1;
            }
        }
        deleted
    }
}
