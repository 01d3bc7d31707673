//! Course models.

use serde::{Deserialize, Serialize};

use super::percent;

/// A course as listed for the current student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub titre: String,
    pub description: String,
    pub xp_reward: i64,
    #[serde(default)]
    pub completed: bool,
}

/// Response of `POST /api/courses/:id/complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteCourseResponse {
    pub xp_gained: i64,
    pub total_xp: i64,
}

/// Request body for creating or replacing a course from the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    pub titre: String,
    pub description: String,
    pub xp_reward: i64,
}

/// Percentage of `courses` already completed, as shown on the course list.
pub fn completion_percent(courses: &[Course]) -> u32 {
    let done = courses.iter().filter(|course| course.completed).count();
    percent(done as u64, courses.len() as u64)
}
