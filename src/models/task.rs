use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Board columns, in the order they are displayed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Backlog,
    Todo,
    Doing,
    Blocked,
    Done,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habit_id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Date>,
    /// Manually set, except that a `done` task is always at 100.
    #[serde(default)]
    pub progress: u8,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub habit_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub spent_hours: Option<f64>,
    #[serde(default)]
    pub deadline: Option<Date>,
    #[serde(default)]
    pub progress: u8,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub(crate) fn into_task(self, id: String, now: Timestamp) -> Task {
        Task {
            id,
            goal_id: self.goal_id,
            habit_id: self.habit_id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.status,
            estimated_hours: self.estimated_hours,
            spent_hours: self.spent_hours,
            deadline: self.deadline,
            progress: self.progress,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub goal_id: Option<Option<String>>,
    pub habit_id: Option<Option<String>>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Option<Priority>>,
    pub status: Option<TaskStatus>,
    pub estimated_hours: Option<Option<f64>>,
    pub spent_hours: Option<Option<f64>>,
    pub deadline: Option<Option<Date>>,
    pub progress: Option<u8>,
}

impl TaskPatch {
    /// Patch that only moves the task to another status column.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, task: &mut Task) {
        if let Some(goal_id) = self.goal_id {
            task.goal_id = goal_id;
        }
        if let Some(habit_id) = self.habit_id {
            task.habit_id = habit_id;
        }
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(estimated) = self.estimated_hours {
            task.estimated_hours = estimated;
        }
        if let Some(spent) = self.spent_hours {
            task.spent_hours = spent;
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(progress) = self.progress {
            task.progress = progress;
        }
    }
}
