//! REST API module.
//!
//! Contains the upload routes served by this repository.

mod uploads;

pub use uploads::*;
