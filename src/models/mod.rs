//! Data models for the MONKI backend contract.
//!
//! Field names follow the backend JSON (camelCase). The backend owns every
//! value here; the client only reads and displays them.

mod badge;
mod course;
mod kpi;
mod ranking;
mod shop;
mod teacher;
mod upload;
mod user;

pub use badge::*;
pub use course::*;
pub use kpi::*;
pub use ranking::*;
pub use shop::*;
pub use teacher::*;
pub use upload::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Body returned by admin delete endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Share of `part` in `total` as a whole percentage, 0 when `total` is 0.
pub fn percent(part: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 * 100.0) / total as f64).round() as u32
}
