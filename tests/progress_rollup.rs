use goalpost::models::{GoalPatch, NewGoal, NewHabit, NewTask, TaskPatch, TaskStatus};
use goalpost::progress::{habit_progress, recompute_all};
use goalpost::snapshot::Snapshot;
use goalpost::store::Store;
use jiff::Timestamp;
use tempfile::TempDir;

#[test]
fn done_status_is_the_only_forcing_condition() {
    let mut store = Store::seeded();
    for task in store.tasks() {
        if task.status == TaskStatus::Done {
            assert_eq!(task.progress, 100, "{}", task.id);
        }
    }

    let task = store
        .update_task(
            "tseed0003",
            TaskPatch {
                progress: Some(100),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    assert_eq!(task.status, TaskStatus::Doing);
    assert_eq!(task.progress, 100);
}

#[test]
fn habit_progress_pins() {
    let mut store = Store::new();
    let goal = store.create_goal(NewGoal::new("Pins"));
    for (completed, target, expected) in [(3, 4, 75), (5, 4, 100), (0, 4, 0)] {
        let habit = store.create_habit(NewHabit {
            completed_in_period: completed,
            ..NewHabit::new(goal.id.clone(), "Pinned", target)
        });
        assert_eq!(habit.progress, expected);
        assert_eq!(habit_progress(&habit), expected);
    }
}

#[test]
fn goal_rollup_and_cascade() {
    let mut store = Store::new();
    let goal = store.create_goal(NewGoal::new("Move abroad"));
    let visa = store.create_habit(NewHabit {
        completed_in_period: 4,
        ..NewHabit::new(goal.id.clone(), "Paperwork session", 5)
    });
    let language = store.create_habit(NewHabit {
        completed_in_period: 2,
        ..NewHabit::new(goal.id.clone(), "Language practice", 5)
    });
    store.create_task(NewTask {
        goal_id: Some(goal.id.clone()),
        status: TaskStatus::Done,
        ..NewTask::new("Book flights")
    });
    assert_eq!(store.goal(&goal.id).unwrap().progress, 73);

    for _ in 0..3 {
        store.create_task(NewTask {
            goal_id: Some(goal.id.clone()),
            habit_id: Some(visa.id.clone()),
            ..NewTask::new("Fill a form")
        });
    }
    store.create_task(NewTask {
        goal_id: Some(goal.id.clone()),
        habit_id: Some(language.id.clone()),
        ..NewTask::new("Join a conversation club")
    });
    let unrelated = store.create_goal(NewGoal::new("Unrelated"));
    let kept = store.create_task(NewTask {
        goal_id: Some(unrelated.id.clone()),
        ..NewTask::new("Stays")
    });

    let before = store.tasks().len();
    assert!(store.delete_goal(&goal.id));
    assert_eq!(before - store.tasks().len(), 5);
    assert!(store.habits().is_empty());
    assert_eq!(store.tasks(), vec![kept]);
}

#[test]
fn recompute_twice_is_stable() {
    let store = Store::seeded();
    let (goals, habits, tasks) = store.into_parts();

    let first = recompute_all(&goals, &habits, &tasks, Timestamp::now());
    let second = recompute_all(&first.goals, &first.habits, &first.tasks, Timestamp::now());
    assert_eq!(first, second);
}

#[test]
fn mark_done_then_reset() {
    let mut store = Store::new();
    let goal = store.create_goal(NewGoal::new("Swim"));
    let habit = store.create_habit(NewHabit {
        completed_in_period: 2,
        ..NewHabit::new(goal.id, "Laps", 4)
    });

    let habit = store.mark_habit_done(&habit.id).unwrap();
    assert_eq!((habit.completed_in_period, habit.progress), (3, 75));

    let habit = store.reset_habit_cycle(&habit.id).unwrap();
    assert_eq!((habit.completed_in_period, habit.progress), (0, 0));
}

#[test]
fn unknown_update_changes_nothing() {
    let mut store = Store::seeded();
    let (goals, habits, tasks) = store.clone().into_parts();

    let patch = GoalPatch {
        title: Some("Ghost".to_string()),
        ..GoalPatch::default()
    };
    assert!(store.update_goal("nonexistent-id", patch).is_none());
    let habit_patch = Default::default();
    assert!(store.update_habit("nonexistent-id", habit_patch).is_none());
    assert!(!store.delete_task("nonexistent-id"));

    assert_eq!(store.goals(), goals);
    assert_eq!(store.habits(), habits);
    assert_eq!(store.tasks(), tasks);
}

#[test]
fn timestamps_never_go_backwards() {
    let mut store = Store::seeded();
    let task = store.task("tseed0007").unwrap();

    let moved = store
        .update_task(&task.id, TaskPatch::status(TaskStatus::Done))
        .unwrap();
    assert!(moved.updated_at > task.updated_at);

    for goal in store.goals() {
        assert!(goal.updated_at >= goal.created_at);
    }
    for habit in store.habits() {
        assert!(habit.updated_at >= habit.created_at);
    }
    for task in store.tasks() {
        assert!(task.updated_at >= task.created_at);
    }
}

#[test]
fn snapshot_round_trip_keeps_progress() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::seeded();
    store.mark_habit_done("hseed0003").unwrap();

    Snapshot::from_store(&store).save(dir.path()).unwrap();
    let restored = Snapshot::load(dir.path()).unwrap().into_store();

    assert_eq!(restored.goals(), store.goals());
    assert_eq!(restored.habits(), store.habits());
    assert_eq!(restored.tasks(), store.tasks());
}
