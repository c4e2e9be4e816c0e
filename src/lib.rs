//! torchrl-build - build harness for the torchrl native extension
//!
//! This crate provides the library behind the `torchrl-build` CLI:
//! extension source discovery and flag selection, native compilation,
//! artifact cleanup, and package metadata.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test fixtures for torchrl-build unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    extension::ExtensionDescriptor,
    layout::ProjectLayout,
    package::PackageMetadata,
    profile::{BuildMode, BuildProfile},
};

pub use util::context::GlobalContext;
