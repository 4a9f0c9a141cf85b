//! Command implementations

pub mod list;
pub mod push;
pub mod version;
