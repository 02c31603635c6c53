pub mod cli;
pub mod commands;
pub mod config;
pub mod helpers;
pub mod id;
pub mod models;
pub mod output;
pub mod progress;
pub mod seed;
pub mod snapshot;
pub mod store;

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use cli::{Cli, Commands, GoalCommands, HabitCommands, TaskCommands};
use config::Config;
use models::{GoalPatch, HabitPatch, NewGoal, NewHabit, NewTask, TaskPatch};
use snapshot::{Snapshot, SNAPSHOT_FILE};
use store::Store;

pub const GOALPOST_DIR: &str = ".goalpost";

/// Finds the `.goalpost/` directory by walking up from the current directory.
/// Returns `None` if no `.goalpost/` directory is found.
pub fn find_goalpost_dir() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    let mut dir = current_dir.as_path();

    loop {
        let goalpost_path = dir.join(GOALPOST_DIR);
        if goalpost_path.is_dir() {
            return Some(goalpost_path);
        }

        dir = dir.parent()?;
    }
}

/// Log level from the nearest workspace config, if there is one.
pub fn configured_log_level() -> Option<String> {
    let dir = find_goalpost_dir()?;
    Config::load(&dir).ok().map(|config| config.log.level)
}

/// An initialized `.goalpost/` directory with its config and loaded store.
pub struct Workspace {
    pub dir: PathBuf,
    pub config: Config,
    pub store: Store,
}

impl Workspace {
    pub fn open(dir: PathBuf) -> Result<Self> {
        let config = Config::load(&dir)?;
        let store = Snapshot::load(&dir)
            .context("Failed to load snapshot")?
            .into_store();
        Ok(Self { dir, config, store })
    }

    pub fn save(&self) -> Result<()> {
        Snapshot::from_store(&self.store).save(&self.dir)
    }
}

fn ensure_initialized() -> Result<Workspace> {
    let dir = find_goalpost_dir()
        .ok_or_else(|| anyhow!("Goalpost not initialized. Run 'gp init' first."))?;

    if !dir.join(SNAPSHOT_FILE).exists() {
        return Err(anyhow!("Goalpost not initialized. Run 'gp init' first."));
    }

    Workspace::open(dir)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { empty } => {
            let result = commands::init::run(empty)?;
            output::initialized(&result, cli.json)
        }
        Commands::Goal(goal_cmd) => {
            let mut ws = ensure_initialized()?;
            let json = cli.json || ws.config.output.json;
            match goal_cmd {
                GoalCommands::Create { title, fields } => {
                    let new = NewGoal {
                        title,
                        description: fields.description,
                        start: fields.start,
                        end: fields.end,
                        status: fields.status.unwrap_or_default(),
                    };
                    let goal = commands::goal::create(new, &mut ws.store)?;
                    ws.save()?;
                    output::goal_saved("Created", &goal, json)
                }
                GoalCommands::List => output::goal_list(&commands::goal::list(&ws.store), json),
                GoalCommands::Show { goal_id } => {
                    output::goal_detail(&commands::goal::show(&goal_id, &ws.store)?, json)
                }
                GoalCommands::Update {
                    goal_id,
                    title,
                    fields,
                } => {
                    let patch = GoalPatch {
                        title,
                        description: fields.description.map(Some),
                        start: fields.start.map(Some),
                        end: fields.end.map(Some),
                        status: fields.status,
                    };
                    let goal = commands::goal::update(&goal_id, patch, &mut ws.store)?;
                    ws.save()?;
                    output::goal_saved("Updated", &goal, json)
                }
                GoalCommands::Delete { goal_ids } => {
                    let result = commands::goal::delete(goal_ids, &mut ws.store);
                    ws.save()?;
                    output::deleted("goal", &result, json)
                }
            }
        }
        Commands::Habit(habit_cmd) => {
            let mut ws = ensure_initialized()?;
            let json = cli.json || ws.config.output.json;
            match habit_cmd {
                HabitCommands::Create {
                    goal_id,
                    title,
                    target,
                    fields,
                } => {
                    let new = NewHabit {
                        description: fields.description,
                        frequency: fields.frequency.unwrap_or_default(),
                        status: fields.status.unwrap_or_default(),
                        ..NewHabit::new(goal_id, title, target)
                    };
                    let habit = commands::habit::create(new, &mut ws.store)?;
                    ws.save()?;
                    output::habit_saved("Created", &habit, json)
                }
                HabitCommands::List { goal } => {
                    output::habit_list(&commands::habit::list(goal, &ws.store)?, json)
                }
                HabitCommands::Update {
                    habit_id,
                    title,
                    goal,
                    target,
                    completed,
                    fields,
                } => {
                    let patch = HabitPatch {
                        goal_id: goal,
                        title,
                        description: fields.description.map(Some),
                        frequency: fields.frequency,
                        target_per_period: target,
                        completed_in_period: completed,
                        status: fields.status,
                    };
                    let habit = commands::habit::update(&habit_id, patch, &mut ws.store)?;
                    ws.save()?;
                    output::habit_saved("Updated", &habit, json)
                }
                HabitCommands::Done { habit_id } => {
                    let habit = commands::habit::done(&habit_id, &mut ws.store)?;
                    ws.save()?;
                    output::habit_saved("Marked done", &habit, json)
                }
                HabitCommands::Reset { habit_id } => {
                    let habit = commands::habit::reset(&habit_id, &mut ws.store)?;
                    ws.save()?;
                    output::habit_saved("Reset", &habit, json)
                }
                HabitCommands::Delete { habit_ids } => {
                    let result = commands::habit::delete(habit_ids, &mut ws.store);
                    ws.save()?;
                    output::deleted("habit", &result, json)
                }
            }
        }
        Commands::Task(task_cmd) => {
            let mut ws = ensure_initialized()?;
            let json = cli.json || ws.config.output.json;
            match task_cmd {
                TaskCommands::Create { title, fields } => {
                    let new = NewTask {
                        goal_id: fields.goal,
                        habit_id: fields.habit,
                        title,
                        description: fields.description,
                        priority: fields.priority,
                        status: fields.status.unwrap_or_default(),
                        estimated_hours: fields.estimate,
                        spent_hours: fields.spent,
                        deadline: fields.deadline,
                        progress: fields.progress.unwrap_or(0),
                    };
                    let task = commands::task::create(new, &mut ws.store)?;
                    ws.save()?;
                    output::task_saved("Created", &task, json)
                }
                TaskCommands::List { goal, habit } => {
                    output::task_list(&commands::task::list(goal, habit, &ws.store)?, json)
                }
                TaskCommands::Update {
                    task_id,
                    title,
                    fields,
                    clear_deadline,
                    unlink_habit,
                } => {
                    let patch = TaskPatch {
                        goal_id: fields.goal.map(Some),
                        habit_id: if unlink_habit {
                            Some(None)
                        } else {
                            fields.habit.map(Some)
                        },
                        title,
                        description: fields.description.map(Some),
                        priority: fields.priority.map(Some),
                        status: fields.status,
                        estimated_hours: fields.estimate.map(Some),
                        spent_hours: fields.spent.map(Some),
                        deadline: if clear_deadline {
                            Some(None)
                        } else {
                            fields.deadline.map(Some)
                        },
                        progress: fields.progress,
                    };
                    let task = commands::task::update(&task_id, patch, &mut ws.store)?;
                    ws.save()?;
                    output::task_saved("Updated", &task, json)
                }
                TaskCommands::Move { task_id, status } => {
                    let task = commands::task::move_to(&task_id, status, &mut ws.store)?;
                    ws.save()?;
                    output::task_saved("Moved", &task, json)
                }
                TaskCommands::Delete { task_ids } => {
                    let result = commands::task::delete(task_ids, &mut ws.store);
                    ws.save()?;
                    output::deleted("task", &result, json)
                }
            }
        }
        Commands::Status { goal } => {
            let ws = ensure_initialized()?;
            let json = cli.json || ws.config.output.json;
            let result = commands::status::run(goal, progress::today(), &ws.store)?;
            output::status(&result, json)
        }
    }
}
