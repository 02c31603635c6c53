use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

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
pub enum GoalStatus {
    #[default]
    Planned,
    InProgress,
    Done,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Date>,
    pub status: GoalStatus,
    /// Mean progress of the goal's habits and tasks. Derived, never set directly.
    #[serde(default)]
    pub progress: u8,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields a caller supplies when creating a goal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start: Option<Date>,
    #[serde(default)]
    pub end: Option<Date>,
    #[serde(default)]
    pub status: GoalStatus,
}

impl NewGoal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub(crate) fn into_goal(self, id: String, now: Timestamp) -> Goal {
        Goal {
            id,
            title: self.title,
            description: self.description,
            start: self.start,
            end: self.end,
            status: self.status,
            progress: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a goal. `None` leaves a field untouched; for optional
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start: Option<Option<Date>>,
    pub end: Option<Option<Date>>,
    pub status: Option<GoalStatus>,
}

impl GoalPatch {
    pub(crate) fn apply(self, goal: &mut Goal) {
        if let Some(title) = self.title {
            goal.title = title;
        }
        if let Some(description) = self.description {
            goal.description = description;
        }
        if let Some(start) = self.start {
            goal.start = start;
        }
        if let Some(end) = self.end {
            goal.end = end;
        }
        if let Some(status) = self.status {
            goal.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_spellings() {
        assert_eq!(GoalStatus::InProgress.as_ref(), "in_progress");
        let archived: GoalStatus = "archived".parse().unwrap();
        assert_eq!(archived, GoalStatus::Archived);
        assert_eq!(
            serde_json::to_string(&GoalStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert!("finished".parse::<GoalStatus>().is_err());
    }

    #[test]
    fn test_patch_clears_optional_fields() {
        let now = Timestamp::UNIX_EPOCH;
        let mut goal = NewGoal {
            description: Some("old".to_string()),
            ..NewGoal::new("Run a marathon")
        }
        .into_goal("gAAAAAAAA".to_string(), now);

        GoalPatch {
            title: Some("Run a half marathon".to_string()),
            description: Some(None),
            ..GoalPatch::default()
        }
        .apply(&mut goal);

        assert_eq!(goal.title, "Run a half marathon");
        assert_eq!(goal.description, None);
        assert_eq!(goal.status, GoalStatus::Planned);
    }
}
