//! Filesystem primitives shared across dependencies.

pub mod digest;

pub use digest::{digest_file, files_match};
