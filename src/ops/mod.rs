//! High-level operations.
//!
//! This module contains the implementation of torchrl-build commands.

pub mod build_ext;
pub mod clean;
pub mod metadata;

pub use build_ext::{build, BuildOptions, BuildResult};
pub use clean::{clean, standard_clean, CleanReport};
pub use metadata::{metadata, MetadataFormat};
