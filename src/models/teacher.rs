//! Teacher statistics models.

use serde::{Deserialize, Serialize};

/// A student's completion of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub user_id: String,
    pub prenom: String,
    pub completed_at: String,
}

/// Response of `GET /api/teacher/courses/:id/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStats {
    pub course_id: String,
    pub titre: String,
    pub completions: Vec<Completion>,
}

/// A student taking part in a live session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub user_id: String,
    pub prenom: String,
    pub score: i64,
}

/// Response of `GET /api/teacher/sessions/:id/participants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionParticipants {
    pub session_id: String,
    pub participants: Vec<Participant>,
}
