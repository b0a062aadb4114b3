//! Talk schedule: validation and loading.
//!
//! The schedule is a YAML file holding either `{upcoming, past}` sections or
//! a flat list of talks. It is validated as a whole before any entry is
//! normalized, so a single run reports every problem.

pub mod error;
pub mod loader;
pub mod validate;

pub use error::{ScheduleError, Violation};
pub use loader::{LoadedSchedule, load_schedule, validate_schedule};
