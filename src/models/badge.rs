//! Badge models.

use serde::{Deserialize, Serialize};

use super::percent;

/// What a badge is unlocked by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConditionType {
    #[serde(rename = "xp")]
    Xp,
    #[serde(rename = "top10")]
    Top10,
    #[serde(rename = "courses_completed")]
    CoursesCompleted,
    #[serde(rename = "streak")]
    Streak,
}

impl ConditionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::Xp => "xp",
            ConditionType::Top10 => "top10",
            ConditionType::CoursesCompleted => "courses_completed",
            ConditionType::Streak => "streak",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "xp" => Some(ConditionType::Xp),
            "top10" => Some(ConditionType::Top10),
            "courses_completed" => Some(ConditionType::CoursesCompleted),
            "streak" => Some(ConditionType::Streak),
            _ => None,
        }
    }
}

/// An unlockable achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_xp: Option<i64>,
    pub condition_type: ConditionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_value: Option<i64>,
    /// Only present on the student view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked: Option<bool>,
}

/// Unlock counters for the current student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeStats {
    pub unlocked: u64,
    pub total: u64,
}

impl BadgeStats {
    /// Progress shown on the badge page.
    pub fn unlock_percent(&self) -> u32 {
        percent(self.unlocked, self.total)
    }
}

/// Response of `GET /api/student/badges`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgesResponse {
    pub badges: Vec<Badge>,
    pub stats: BadgeStats,
}

/// Request body for creating or replacing a badge from the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeInput {
    pub name: String,
    pub icon: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_xp: Option<i64>,
    pub condition_type: ConditionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_value: Option<i64>,
}
