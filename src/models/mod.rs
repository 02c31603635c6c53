mod goal;
mod habit;
mod task;

pub use goal::{Goal, GoalPatch, GoalStatus, NewGoal};
pub use habit::{Frequency, Habit, HabitPatch, HabitStatus, NewHabit};
pub use task::{NewTask, Priority, Task, TaskPatch, TaskStatus};

/// Upper bound of every progress value, in percent.
pub const MAX_PROGRESS: u8 = 100;
