//! Admin dashboard counters.

use serde::{Deserialize, Serialize};

/// Aggregate counters returned by `GET /api/admin/kpi`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub total_students: i64,
    pub total_xp: i64,
    pub active_courses: i64,
    pub badges_unlocked: i64,
}
