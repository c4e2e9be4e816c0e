//! Native extension build.
//!
//! Source discovery and flag selection produce an extension descriptor;
//! the native builder runs the C++ toolchain over it.

pub mod fingerprint;
pub mod native;
pub mod orchestrator;
pub mod sources;
pub mod toolchain;
pub mod torch;

pub use native::{Artifact, NativeBuilder};
pub use orchestrator::get_extensions;
pub use sources::discover_sources;
pub use toolchain::{detect_toolchain, CommandSpec, GccToolchain, Toolchain, ToolchainFamily};
pub use torch::TorchPaths;
