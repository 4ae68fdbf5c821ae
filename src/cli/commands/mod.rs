//! Command implementations

pub mod check;
pub mod completions;
pub mod config;
pub mod init;
pub mod size;
