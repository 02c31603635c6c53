//! Bootstrap dataset loaded by `gp init`.
//!
//! Dates are relative to `today` so the data always shows a mix of finished,
//! running, blocked and overdue work.

use jiff::civil::Date;
use jiff::{Timestamp, ToSpan};

use crate::models::{
    Frequency, GoalStatus, HabitStatus, NewGoal, NewHabit, NewTask, Priority, TaskStatus,
};
use crate::snapshot::Snapshot;

fn day(today: Date, offset: i64) -> Date {
    today.saturating_add(offset.days())
}

/// Time spent so far, proportional to progress and rounded to half hours.
fn half_hours(seed: &SeedTask) -> f64 {
    (seed.estimated_hours * f64::from(seed.progress) / 50.0).round() / 2.0
}

struct SeedTask {
    id: &'static str,
    goal: Option<&'static str>,
    habit: Option<&'static str>,
    title: &'static str,
    priority: Priority,
    status: TaskStatus,
    progress: u8,
    estimated_hours: f64,
    deadline: i64,
}

#[rustfmt::skip]
const TASKS: [SeedTask; 15] = [
    SeedTask { id: "tseed0001", goal: Some("gseed0001"), habit: None, title: "Buy running shoes", priority: Priority::High, status: TaskStatus::Done, progress: 100, estimated_hours: 2.0, deadline: -20 },
    SeedTask { id: "tseed0002", goal: Some("gseed0001"), habit: None, title: "Register for the race", priority: Priority::High, status: TaskStatus::Done, progress: 100, estimated_hours: 0.5, deadline: -10 },
    SeedTask { id: "tseed0003", goal: Some("gseed0001"), habit: Some("hseed0001"), title: "Plan interval sessions", priority: Priority::Medium, status: TaskStatus::Doing, progress: 60, estimated_hours: 3.0, deadline: 3 },
    SeedTask { id: "tseed0004", goal: Some("gseed0001"), habit: Some("hseed0001"), title: "Map a 15 km route", priority: Priority::Low, status: TaskStatus::Todo, progress: 0, estimated_hours: 1.0, deadline: -2 },
    SeedTask { id: "tseed0005", goal: Some("gseed0001"), habit: Some("hseed0002"), title: "Book a physio check", priority: Priority::Medium, status: TaskStatus::Blocked, progress: 20, estimated_hours: 1.0, deadline: -4 },
    SeedTask { id: "tseed0006", goal: Some("gseed0002"), habit: None, title: "Take a placement test", priority: Priority::High, status: TaskStatus::Done, progress: 100, estimated_hours: 1.5, deadline: -30 },
    SeedTask { id: "tseed0007", goal: Some("gseed0002"), habit: Some("hseed0003"), title: "Finish the past tense unit", priority: Priority::Medium, status: TaskStatus::Doing, progress: 45, estimated_hours: 6.0, deadline: 7 },
    SeedTask { id: "tseed0008", goal: Some("gseed0002"), habit: Some("hseed0004"), title: "Summarize a news article", priority: Priority::Low, status: TaskStatus::Todo, progress: 0, estimated_hours: 1.0, deadline: -1 },
    SeedTask { id: "tseed0009", goal: Some("gseed0002"), habit: None, title: "Find a conversation partner", priority: Priority::Medium, status: TaskStatus::Blocked, progress: 10, estimated_hours: 2.0, deadline: 14 },
    SeedTask { id: "tseed0010", goal: Some("gseed0002"), habit: None, title: "Watch a film without subtitles", priority: Priority::Low, status: TaskStatus::Backlog, progress: 0, estimated_hours: 2.0, deadline: 30 },
    SeedTask { id: "tseed0011", goal: Some("gseed0003"), habit: None, title: "Register a domain", priority: Priority::High, status: TaskStatus::Done, progress: 100, estimated_hours: 0.5, deadline: -7 },
    SeedTask { id: "tseed0012", goal: Some("gseed0003"), habit: None, title: "Pick a static site generator", priority: Priority::Medium, status: TaskStatus::Doing, progress: 80, estimated_hours: 4.0, deadline: -3 },
    SeedTask { id: "tseed0013", goal: Some("gseed0003"), habit: Some("hseed0005"), title: "Draft the about page", priority: Priority::Medium, status: TaskStatus::Todo, progress: 0, estimated_hours: 2.0, deadline: 5 },
    SeedTask { id: "tseed0014", goal: Some("gseed0003"), habit: None, title: "Set up deployment", priority: Priority::High, status: TaskStatus::Backlog, progress: 0, estimated_hours: 3.0, deadline: 21 },
    SeedTask { id: "tseed0015", goal: None, habit: None, title: "Renew library card", priority: Priority::Low, status: TaskStatus::Todo, progress: 0, estimated_hours: 0.5, deadline: -5 },
];

/// The bootstrap dataset: 3 goals, 5 habits and 15 tasks. Progress values are
/// left for the store to recompute.
pub fn dataset(now: Timestamp, today: Date) -> Snapshot {
    let goals = vec![
        NewGoal {
            description: Some("Finish under two hours".to_string()),
            start: Some(day(today, -60)),
            end: Some(day(today, 45)),
            status: GoalStatus::InProgress,
            ..NewGoal::new("Run a half marathon")
        }
        .into_goal("gseed0001".to_string(), now),
        NewGoal {
            description: Some("Reach B1 level".to_string()),
            start: Some(day(today, -90)),
            end: Some(day(today, 180)),
            status: GoalStatus::InProgress,
            ..NewGoal::new("Learn Spanish")
        }
        .into_goal("gseed0002".to_string(), now),
        NewGoal {
            start: Some(day(today, -14)),
            status: GoalStatus::Planned,
            ..NewGoal::new("Launch a personal website")
        }
        .into_goal("gseed0003".to_string(), now),
    ];

    let habits = vec![
        NewHabit {
            frequency: Frequency::Weekly,
            completed_in_period: 3,
            ..NewHabit::new("gseed0001", "Morning run", 4)
        }
        .into_habit("hseed0001".to_string(), now),
        NewHabit {
            description: Some("Ten minutes after every run".to_string()),
            completed_in_period: 1,
            ..NewHabit::new("gseed0001", "Stretching", 1)
        }
        .into_habit("hseed0002".to_string(), now),
        NewHabit::new("gseed0002", "Daily lesson", 1).into_habit("hseed0003".to_string(), now),
        NewHabit {
            frequency: Frequency::Weekly,
            completed_in_period: 1,
            ..NewHabit::new("gseed0002", "Read an article in Spanish", 3)
        }
        .into_habit("hseed0004".to_string(), now),
        NewHabit {
            frequency: Frequency::Monthly,
            status: HabitStatus::Paused,
            ..NewHabit::new("gseed0003", "Publish a post", 2)
        }
        .into_habit("hseed0005".to_string(), now),
    ];

    let tasks = TASKS
        .iter()
        .map(|seed| {
            NewTask {
                goal_id: seed.goal.map(str::to_string),
                habit_id: seed.habit.map(str::to_string),
                priority: Some(seed.priority),
                status: seed.status,
                progress: seed.progress,
                estimated_hours: Some(seed.estimated_hours),
                spent_hours: (seed.progress > 0).then(|| half_hours(seed)),
                deadline: Some(day(today, seed.deadline)),
                ..NewTask::new(seed.title)
            }
            .into_task(seed.id.to_string(), now)
        })
        .collect();

    Snapshot {
        goals,
        habits,
        tasks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::is_overdue;
    use crate::store::Store;
    use jiff::civil::date;

    #[test]
    fn test_dataset_shape() {
        let data = dataset(Timestamp::UNIX_EPOCH, date(2026, 5, 1));
        assert_eq!(data.goals.len(), 3);
        assert_eq!(data.habits.len(), 5);
        assert_eq!(data.tasks.len(), 15);
    }

    #[test]
    fn test_dataset_covers_every_state() {
        let today = date(2026, 5, 1);
        let data = dataset(Timestamp::UNIX_EPOCH, today);

        for status in [TaskStatus::Done, TaskStatus::Doing, TaskStatus::Blocked] {
            assert!(data.tasks.iter().any(|t| t.status == status));
        }
        assert!(data.tasks.iter().any(|t| is_overdue(t, today)));
    }

    #[test]
    fn test_seeded_store_is_consistent() {
        let store = Store::seeded();
        assert_eq!(store.tasks().len(), 15);

        for task in store.tasks() {
            if task.is_done() {
                assert_eq!(task.progress, 100);
            }
            if let Some(habit_id) = &task.habit_id {
                assert!(store.habit(habit_id).is_some());
            }
        }

        // Morning run: 3 of 4.
        assert_eq!(store.habit("hseed0001").unwrap().progress, 75);
        // Run a half marathon: habits 75, 100; tasks 100, 100, 60, 0, 20.
        assert_eq!(store.goal("gseed0001").unwrap().progress, 65);
    }
}
