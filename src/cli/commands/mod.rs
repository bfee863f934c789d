//! CLI command implementations
//!
//! Every command returns its process exit code:
//! `0` success, `1` export failures, `2` configuration error,
//! `4` connection error, `5` fatal error.

pub mod export;
pub mod groups;
pub mod init;
pub mod validate;
