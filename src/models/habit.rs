use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// How often a habit's period rolls over. Informational only: progress is
/// computed from the per-period counters regardless of frequency.
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
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

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
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HabitStatus {
    #[default]
    Active,
    Paused,
    Done,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub goal_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub frequency: Frequency,
    pub target_per_period: u32,
    pub completed_in_period: u32,
    pub status: HabitStatus,
    #[serde(default)]
    pub progress: u8,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHabit {
    pub goal_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub frequency: Frequency,
    pub target_per_period: u32,
    #[serde(default)]
    pub completed_in_period: u32,
    #[serde(default)]
    pub status: HabitStatus,
}

impl NewHabit {
    pub fn new(
        goal_id: impl Into<String>,
        title: impl Into<String>,
        target_per_period: u32,
    ) -> Self {
        Self {
            goal_id: goal_id.into(),
            title: title.into(),
            description: None,
            frequency: Frequency::default(),
            target_per_period,
            completed_in_period: 0,
            status: HabitStatus::default(),
        }
    }

    pub(crate) fn into_habit(self, id: String, now: Timestamp) -> Habit {
        Habit {
            id,
            goal_id: self.goal_id,
            title: self.title,
            description: self.description,
            frequency: self.frequency,
            target_per_period: self.target_per_period,
            completed_in_period: self.completed_in_period,
            status: self.status,
            progress: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitPatch {
    pub goal_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub frequency: Option<Frequency>,
    pub target_per_period: Option<u32>,
    pub completed_in_period: Option<u32>,
    pub status: Option<HabitStatus>,
}

impl HabitPatch {
    pub(crate) fn apply(self, habit: &mut Habit) {
        if let Some(goal_id) = self.goal_id {
            habit.goal_id = goal_id;
        }
        if let Some(title) = self.title {
            habit.title = title;
        }
        if let Some(description) = self.description {
            habit.description = description;
        }
        if let Some(frequency) = self.frequency {
            habit.frequency = frequency;
        }
        if let Some(target) = self.target_per_period {
            habit.target_per_period = target;
        }
        if let Some(completed) = self.completed_in_period {
            habit.completed_in_period = completed;
        }
        if let Some(status) = self.status {
            habit.status = status;
        }
    }
}
