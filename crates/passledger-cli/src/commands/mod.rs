//! Command handlers, one module per command family.

pub mod entries;
pub mod generate;
pub mod groups;
pub mod init;
pub mod maintenance;
pub mod misc;
