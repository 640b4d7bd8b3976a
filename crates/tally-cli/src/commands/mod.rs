//! Command handlers.

pub mod add;
pub mod balance;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod misc;
pub mod settle;
pub mod show;
pub mod summary;
