//! Core data types.
//!
//! The project layout, build profiles, extension descriptors and package
//! metadata all live here. Nothing in this module runs a compiler.

pub mod errors;
pub mod extension;
pub mod layout;
pub mod package;
pub mod profile;

pub use errors::ExtensionError;
pub use extension::{ExtensionDescriptor, SourceSet};
pub use layout::ProjectLayout;
pub use package::PackageMetadata;
pub use profile::{BuildMode, BuildProfile};
