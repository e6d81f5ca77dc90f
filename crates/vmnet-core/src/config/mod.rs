//! Settings for the tool itself (`vmnet.toml`).
//!
//! Every value is optional; unset values fall back to the default path
//! layout rooted at the tool home directory.

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use parser::{parse_vmnet_toml, parse_vmnet_toml_str};
pub use paths::ToolPaths;
pub use schema::{BinariesSection, LimaSection, NetworkSection, SudoersSection, VmnetConfig};
pub use store::ConfigStore;
