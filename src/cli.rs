use clap::{Args, Parser, Subcommand};
use jiff::civil::Date;

use crate::models::{Frequency, GoalStatus, HabitStatus, Priority, TaskStatus};

#[derive(Parser)]
#[command(name = "gp")]
#[command(about = "Track goals, habits and tasks with progress that rolls up")]
#[command(version)]
pub struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a .goalpost/ workspace in the current directory
    Init {
        /// Start without the sample goals, habits and tasks
        #[arg(long)]
        empty: bool,
    },
    /// Manage goals
    #[command(subcommand)]
    Goal(GoalCommands),
    /// Manage habits
    #[command(subcommand)]
    Habit(HabitCommands),
    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommands),
    /// Show progress for every goal, or one goal in detail
    Status {
        /// Goal to show in detail
        #[arg(long)]
        goal: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a goal
    Create {
        title: String,
        #[command(flatten)]
        fields: GoalFields,
    },
    /// List goals
    List,
    /// Show a goal with its habits and tasks
    Show { goal_id: String },
    /// Edit a goal
    Update {
        goal_id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: GoalFields,
    },
    /// Delete goals together with their habits and tasks
    Delete {
        #[arg(required = true)]
        goal_ids: Vec<String>,
    },
}

#[derive(Args)]
pub struct GoalFields {
    #[arg(long)]
    pub description: Option<String>,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<Date>,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<Date>,
    /// planned, in_progress, done or archived
    #[arg(long)]
    pub status: Option<GoalStatus>,
}

#[derive(Subcommand)]
pub enum HabitCommands {
    /// Create a habit under a goal
    Create {
        goal_id: String,
        title: String,
        /// Completions expected per period
        #[arg(long, default_value_t = 1)]
        target: u32,
        #[command(flatten)]
        fields: HabitFields,
    },
    /// List habits
    List {
        /// Only habits of this goal
        #[arg(long)]
        goal: Option<String>,
    },
    /// Edit a habit
    Update {
        habit_id: String,
        #[arg(long)]
        title: Option<String>,
        /// Move the habit to another goal
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        target: Option<u32>,
        /// Completions so far in the current period
        #[arg(long)]
        completed: Option<u32>,
        #[command(flatten)]
        fields: HabitFields,
    },
    /// Record one completion for the current period
    Done { habit_id: String },
    /// Start a new period
    Reset { habit_id: String },
    /// Delete habits together with their tasks
    Delete {
        #[arg(required = true)]
        habit_ids: Vec<String>,
    },
}

#[derive(Args)]
pub struct HabitFields {
    #[arg(long)]
    pub description: Option<String>,
    /// daily, weekly or monthly
    #[arg(long)]
    pub frequency: Option<Frequency>,
    /// active, paused or done
    #[arg(long)]
    pub status: Option<HabitStatus>,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a task
    Create {
        title: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// List tasks
    List {
        /// Only tasks linked to this goal
        #[arg(long)]
        goal: Option<String>,
        /// Only tasks linked to this habit
        #[arg(long)]
        habit: Option<String>,
    },
    /// Edit a task
    Update {
        task_id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
        /// Remove the deadline
        #[arg(long, conflicts_with = "deadline")]
        clear_deadline: bool,
        /// Unlink the task from its habit
        #[arg(long, conflicts_with = "habit")]
        unlink_habit: bool,
    },
    /// Move a task to another board column
    Move {
        task_id: String,
        /// backlog, todo, doing, blocked or done
        status: TaskStatus,
    },
    /// Delete tasks
    Delete {
        #[arg(required = true)]
        task_ids: Vec<String>,
    },
}

#[derive(Args)]
pub struct TaskFields {
    #[arg(long)]
    pub goal: Option<String>,
    #[arg(long)]
    pub habit: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// low, medium or high
    #[arg(long)]
    pub priority: Option<Priority>,
    /// backlog, todo, doing, blocked or done
    #[arg(long)]
    pub status: Option<TaskStatus>,
    /// Estimated hours
    #[arg(long)]
    pub estimate: Option<f64>,
    /// Hours spent so far
    #[arg(long)]
    pub spent: Option<f64>,
    /// Deadline (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<Date>,
    /// Manual progress, 0 to 100
    #[arg(long)]
    pub progress: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_task_move() {
        let cli =
            Cli::try_parse_from(["gp", "task", "move", "tseed0004", "doing", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Task(TaskCommands::Move { task_id, status }) => {
                assert_eq!(task_id, "tseed0004");
                assert_eq!(status, TaskStatus::Doing);
            }
            _ => panic!("expected task move"),
        }
    }

    #[test]
    fn test_parse_typed_fields() {
        let cli = Cli::try_parse_from([
            "gp",
            "goal",
            "create",
            "Run a marathon",
            "--status",
            "in_progress",
            "--end",
            "2026-12-31",
        ])
        .unwrap();
        match cli.command {
            Commands::Goal(GoalCommands::Create { title, fields }) => {
                assert_eq!(title, "Run a marathon");
                assert_eq!(fields.status, Some(GoalStatus::InProgress));
                assert_eq!(fields.end, Some(jiff::civil::date(2026, 12, 31)));
            }
            _ => panic!("expected goal create"),
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        let args = ["gp", "task", "move", "tseed0004", "finished"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_delete_requires_ids() {
        assert!(Cli::try_parse_from(["gp", "habit", "delete"]).is_err());
    }
}
