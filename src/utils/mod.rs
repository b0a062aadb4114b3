//! Utility modules shared by the loader, scanner and generator.

pub mod date;
pub mod slug;
