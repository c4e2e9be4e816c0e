//! Shared utilities

pub mod config;
pub mod context;
pub mod fs;
pub mod hash;
pub mod process;
pub mod shell;
pub mod vcs;

pub use config::Config;
pub use context::GlobalContext;
pub use shell::{Shell, Status};
