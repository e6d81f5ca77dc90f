//! vmnet Core Library
//!
//! Lifecycle management for the host-side pieces a shared VM network needs:
//! the network helper binaries, the privilege-elevation policy that lets
//! them run, and the network section of the shared Lima configuration file.

pub mod config;
pub mod context;
pub mod dependency;
pub mod error;
pub mod fs;
pub mod lima;
pub mod status;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, ToolPaths, VmnetConfig};

    // Shared Lima file
    pub use crate::lima::{ConfigDocument, NetworkEntry, NetworkTemplate};

    // Dependencies
    pub use crate::dependency::{
        BinariesCapability, Capability, Group, NetworkConfigCapability, PrerequisiteGate,
        SudoersCapability,
    };

    // Errors
    pub use crate::error::{DependencyError, DocumentError};

    // Wiring and reporting
    pub use crate::context::DependencyContext;
    pub use crate::status::{SystemStatus, collect_status};
}
