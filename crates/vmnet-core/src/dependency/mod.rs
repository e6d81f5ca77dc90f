//! Installable pieces of host state.
//!
//! Each dependency is an independent type implementing [`Capability`]. None of
//! them caches whether it is installed: every query re-inspects the disk, so a
//! half-finished install simply reads as "not installed" next time.

pub mod binaries;
pub mod gate;
pub mod group;
pub mod network;
pub mod sudoers;

pub use binaries::BinariesCapability;
pub use gate::PrerequisiteGate;
pub use group::{Group, install_missing};
pub use network::NetworkConfigCapability;
pub use sudoers::SudoersCapability;

use crate::error::DependencyError;

/// Contract shared by every installable dependency.
pub trait Capability: Send + Sync {
    /// Whether the dependency is present in its finished form.
    ///
    /// Total: failures to inspect state collapse to `false`.
    fn installed(&self) -> bool;

    /// Bring the dependency into its installed state.
    fn install(&self) -> Result<(), DependencyError>;

    /// Whether [`install`](Capability::install) needs elevated privileges.
    fn requires_root(&self) -> bool;
}
