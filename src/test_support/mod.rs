//! Test utilities for torchrl-build unit tests.
//!
//! Provides a throwaway project tree laid out like a torchrl checkout.

pub mod fixtures;

pub use fixtures::ExtensionProject;
