//! CLI commands

pub mod build;
pub mod clean;
pub mod contact;
pub mod init;
pub mod like;
pub mod list;
pub mod new;
pub mod show;
