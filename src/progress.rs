//! Progress calculation for the goal/habit/task hierarchy.
//!
//! Progress flows bottom-up: tasks are normalized first, habits are computed
//! from their per-period counters, and goals average the already refreshed
//! progress of everything attached to them.
//!
//! All rounding is round-half-up over exact integer ratios, so `2.5` rounds to
//! `3` and `72.5` rounds to `73`.

use jiff::Timestamp;
use jiff::civil::Date;

use crate::models::{Goal, Habit, Task, MAX_PROGRESS};

/// Collections produced by [`recompute_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recomputed {
    pub goals: Vec<Goal>,
    pub habits: Vec<Habit>,
    pub tasks: Vec<Task>,
}

/// `round(numerator / denominator)` with halves rounded up.
/// `denominator` must be non-zero.
fn round_ratio(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}

fn clamp_progress(value: u64) -> u8 {
    u8::try_from(value.min(u64::from(MAX_PROGRESS))).unwrap_or(MAX_PROGRESS)
}

/// Progress a task should display: 100 when done, the stored value otherwise.
pub fn task_display_progress(task: &Task) -> u8 {
    if task.is_done() {
        MAX_PROGRESS
    } else {
        task.progress.min(MAX_PROGRESS)
    }
}

/// Share of the period target already completed, capped at 100.
/// A zero target yields 0.
pub fn habit_progress(habit: &Habit) -> u8 {
    if habit.target_per_period == 0 {
        return 0;
    }

    let percent = round_ratio(
        u64::from(habit.completed_in_period) * 100,
        u64::from(habit.target_per_period),
    );
    clamp_progress(percent)
}

/// Mean progress of the habits and tasks that belong to `goal`.
///
/// Reads the `progress` field of each item as-is, so habits and tasks must be
/// refreshed before calling this. A goal with nothing attached is at 0.
pub fn goal_progress(goal: &Goal, habits: &[Habit], tasks: &[Task]) -> u8 {
    let habit_values = habits
        .iter()
        .filter(|h| h.goal_id == goal.id)
        .map(|h| h.progress);
    let task_values = tasks
        .iter()
        .filter(|t| t.goal_id.as_deref() == Some(goal.id.as_str()))
        .map(|t| t.progress);

    let (sum, count) = habit_values
        .chain(task_values)
        .fold((0u64, 0u64), |(sum, count), p| {
            (sum + u64::from(p), count + 1)
        });

    if count == 0 {
        return 0;
    }

    clamp_progress(round_ratio(sum, count))
}

/// Refresh the progress of every entity: tasks, then habits, then goals.
///
/// Entities whose progress changes get `updated_at = now`; the rest are copied
/// untouched, so running this twice on the same data changes nothing the
/// second time.
pub fn recompute_all(
    goals: &[Goal],
    habits: &[Habit],
    tasks: &[Task],
    now: Timestamp,
) -> Recomputed {
    let tasks: Vec<Task> = tasks
        .iter()
        .map(|task| {
            let mut task = task.clone();
            let progress = task_display_progress(&task);
            if task.progress != progress {
                task.progress = progress;
                task.updated_at = now;
            }
            task
        })
        .collect();

    let habits: Vec<Habit> = habits
        .iter()
        .map(|habit| {
            let mut habit = habit.clone();
            let progress = habit_progress(&habit);
            if habit.progress != progress {
                habit.progress = progress;
                habit.updated_at = now;
            }
            habit
        })
        .collect();

    let goals: Vec<Goal> = goals
        .iter()
        .map(|goal| {
            let mut goal = goal.clone();
            let progress = goal_progress(&goal, &habits, &tasks);
            if goal.progress != progress {
                goal.progress = progress;
                goal.updated_at = now;
            }
            goal
        })
        .collect();

    Recomputed {
        goals,
        habits,
        tasks,
    }
}

/// The local calendar date that deadlines are compared against.
pub fn today() -> Date {
    jiff::Zoned::now().date()
}

/// A task is overdue when its deadline is strictly before `today` and it is
/// not done yet.
pub fn is_overdue(task: &Task, today: Date) -> bool {
    match task.deadline {
        Some(deadline) => deadline < today && !task.is_done(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewGoal, NewHabit, NewTask, TaskStatus};
    use jiff::civil::date;

    fn ts(seconds: i64) -> Timestamp {
        Timestamp::from_second(seconds).unwrap()
    }

    fn goal(id: &str) -> Goal {
        NewGoal::new(id).into_goal(id.to_string(), ts(0))
    }

    fn habit(id: &str, goal_id: &str, completed: u32, target: u32) -> Habit {
        NewHabit {
            completed_in_period: completed,
            ..NewHabit::new(goal_id, id, target)
        }
        .into_habit(id.to_string(), ts(0))
    }

    fn task(id: &str, goal_id: Option<&str>, status: TaskStatus, progress: u8) -> Task {
        NewTask {
            goal_id: goal_id.map(str::to_string),
            status,
            progress,
            ..NewTask::new(id)
        }
        .into_task(id.to_string(), ts(0))
    }

    #[test]
    fn test_task_progress_forced_only_when_done() {
        let mut t = task("t1", None, TaskStatus::Doing, 40);
        assert_eq!(task_display_progress(&t), 40);

        t.status = TaskStatus::Done;
        assert_eq!(task_display_progress(&t), 100);

        // 100 without being done is a legitimate manual value.
        let t = task("t2", None, TaskStatus::Todo, 100);
        assert_eq!(task_display_progress(&t), 100);
    }

    #[test]
    fn test_habit_progress_formula() {
        assert_eq!(habit_progress(&habit("h", "g", 3, 4)), 75);
        assert_eq!(habit_progress(&habit("h", "g", 5, 4)), 100);
        assert_eq!(habit_progress(&habit("h", "g", 0, 4)), 0);
        assert_eq!(habit_progress(&habit("h", "g", 1, 3)), 33);
        assert_eq!(habit_progress(&habit("h", "g", 2, 3)), 67);
    }

    #[test]
    fn test_habit_progress_rounds_half_up() {
        // 1/8 = 12.5%
        assert_eq!(habit_progress(&habit("h", "g", 1, 8)), 13);
        // 3/8 = 37.5%
        assert_eq!(habit_progress(&habit("h", "g", 3, 8)), 38);
    }

    #[test]
    fn test_habit_progress_zero_target() {
        assert_eq!(habit_progress(&habit("h", "g", 0, 0)), 0);
        assert_eq!(habit_progress(&habit("h", "g", 3, 0)), 0);
    }

    #[test]
    fn test_goal_progress_mean() {
        let g = goal("g1");
        let mut h1 = habit("h1", "g1", 0, 1);
        h1.progress = 80;
        let mut h2 = habit("h2", "g1", 0, 1);
        h2.progress = 40;
        let t = task("t1", Some("g1"), TaskStatus::Done, 100);
        let other = task("t2", Some("g2"), TaskStatus::Todo, 10);

        assert_eq!(goal_progress(&g, &[h1, h2], &[t, other]), 73);
    }

    #[test]
    fn test_goal_progress_rounds_half_up() {
        let g = goal("g1");
        let tasks = vec![
            task("t1", Some("g1"), TaskStatus::Todo, 0),
            task("t2", Some("g1"), TaskStatus::Todo, 5),
        ];
        assert_eq!(goal_progress(&g, &[], &tasks), 3);
    }

    #[test]
    fn test_goal_progress_empty() {
        assert_eq!(goal_progress(&goal("g1"), &[], &[]), 0);
        let stray = task("t1", None, TaskStatus::Done, 100);
        assert_eq!(goal_progress(&goal("g1"), &[], &[stray]), 0);
    }

    #[test]
    fn test_goal_counts_task_through_goal_id_only() {
        // A task linked to the goal's habit but not the goal itself does not count.
        let g = goal("g1");
        let h = habit("h1", "g1", 1, 1);
        let mut t = task("t1", None, TaskStatus::Done, 100);
        t.habit_id = Some("h1".to_string());
        let refreshed = recompute_all(&[g], &[h], &[t], ts(10));
        assert_eq!(refreshed.goals[0].progress, 100);
    }

    #[test]
    fn test_recompute_uses_fresh_children() {
        let goals = vec![goal("g1")];
        // Stored progress values are stale on purpose.
        let habits = vec![habit("h1", "g1", 2, 4)];
        let tasks = vec![task("t1", Some("g1"), TaskStatus::Done, 0)];

        let out = recompute_all(&goals, &habits, &tasks, ts(10));

        assert_eq!(out.tasks[0].progress, 100);
        assert_eq!(out.habits[0].progress, 50);
        assert_eq!(out.goals[0].progress, 75);
    }

    #[test]
    fn test_recompute_stamps_only_changed_entities() {
        let goals = vec![goal("g1"), goal("g2")];
        let habits = vec![habit("h1", "g1", 1, 2)];
        let tasks = vec![task("t1", Some("g1"), TaskStatus::Todo, 0)];

        let out = recompute_all(&goals, &habits, &tasks, ts(10));

        assert_eq!(out.habits[0].updated_at, ts(10));
        assert_eq!(out.goals[0].updated_at, ts(10));
        // Unchanged progress keeps its timestamp.
        assert_eq!(out.tasks[0].updated_at, ts(0));
        assert_eq!(out.goals[1].updated_at, ts(0));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let goals = vec![goal("g1"), goal("g2")];
        let habits = vec![habit("h1", "g1", 3, 4), habit("h2", "g2", 9, 7)];
        let tasks = vec![
            task("t1", Some("g1"), TaskStatus::Done, 20),
            task("t2", Some("g2"), TaskStatus::Blocked, 35),
            task("t3", None, TaskStatus::Doing, 60),
        ];

        let first = recompute_all(&goals, &habits, &tasks, ts(10));
        let second = recompute_all(&first.goals, &first.habits, &first.tasks, ts(20));

        assert_eq!(first, second);
    }

    #[test]
    fn test_is_overdue() {
        let today = date(2026, 3, 10);
        let mut t = task("t1", None, TaskStatus::Doing, 0);
        assert!(!is_overdue(&t, today));

        t.deadline = Some(date(2026, 3, 9));
        assert!(is_overdue(&t, today));

        t.deadline = Some(today);
        assert!(!is_overdue(&t, today));

        t.deadline = Some(date(2026, 3, 1));
        t.status = TaskStatus::Done;
        assert!(!is_overdue(&t, today));
    }
}
