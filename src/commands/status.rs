use anyhow::Result;
use jiff::civil::Date;
use serde::Serialize;

use super::goal::{self, GoalDetail};
use crate::models::Goal;
use crate::progress::is_overdue;
use crate::store::Store;

#[derive(Debug, Serialize)]
pub struct GoalSummary {
    #[serde(flatten)]
    pub goal: Goal,
    pub habit_count: usize,
    pub task_count: usize,
    pub tasks_done: usize,
    pub tasks_overdue: usize,
}

#[derive(Debug, Serialize)]
pub struct Overview {
    pub goals: Vec<GoalSummary>,
    /// Tasks linked to no goal. They count towards nothing.
    pub unassigned_tasks: usize,
    pub overdue_tasks: usize,
}

pub enum StatusResult {
    Goal(GoalDetail),
    Overview(Overview),
}

pub fn run(goal_id: Option<String>, today: Date, store: &Store) -> Result<StatusResult> {
    if let Some(gid) = goal_id {
        return goal::show(&gid, store).map(StatusResult::Goal);
    }

    Ok(StatusResult::Overview(overview(today, store)))
}

fn overview(today: Date, store: &Store) -> Overview {
    let goals = store
        .goals()
        .into_iter()
        .map(|goal| {
            let tasks = store.tasks_by_goal(&goal.id);
            GoalSummary {
                habit_count: store.habits_by_goal(&goal.id).len(),
                task_count: tasks.len(),
                tasks_done: tasks.iter().filter(|t| t.is_done()).count(),
                tasks_overdue: tasks.iter().filter(|t| is_overdue(t, today)).count(),
                goal,
            }
        })
        .collect();

    let tasks = store.tasks();
    Overview {
        goals,
        unassigned_tasks: tasks.iter().filter(|t| t.goal_id.is_none()).count(),
        overdue_tasks: tasks.iter().filter(|t| is_overdue(t, today)).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use jiff::civil::date;
    use jiff::Timestamp;

    fn seeded_for(today: Date) -> Store {
        let data = seed::dataset(Timestamp::now(), today);
        Store::from_parts(data.goals, data.habits, data.tasks)
    }

    #[test]
    fn test_overview_counts() {
        let today = date(2026, 5, 1);
        let store = seeded_for(today);

        let StatusResult::Overview(overview) = run(None, today, &store).unwrap() else {
            panic!("expected overview");
        };

        assert_eq!(overview.goals.len(), 3);
        let marathon = &overview.goals[0];
        assert_eq!(marathon.goal.id, "gseed0001");
        assert_eq!(marathon.habit_count, 2);
        assert_eq!(marathon.task_count, 5);
        assert_eq!(marathon.tasks_done, 2);
        assert_eq!(marathon.tasks_overdue, 2);
        assert_eq!(overview.unassigned_tasks, 1);
        // tseed0004, 0005, 0008, 0012 and 0015.
        assert_eq!(overview.overdue_tasks, 5);
    }

    #[test]
    fn test_goal_detail() {
        let today = date(2026, 5, 1);
        let store = seeded_for(today);
        let result = run(Some("gseed0003".to_string()), today, &store).unwrap();
        match result {
            StatusResult::Goal(detail) => {
                assert_eq!(detail.goal.id, "gseed0003");
                assert_eq!(detail.habits.len(), 1);
                assert_eq!(detail.tasks.len(), 4);
            }
            StatusResult::Overview(_) => panic!("expected goal detail"),
        }
        assert!(run(Some("gmissing1".to_string()), today, &store).is_err());
    }
}
