//! High-level operations.
//!
//! This module contains the implementation of srcset commands.

pub mod emit;
pub mod init;
pub mod resolve;

pub use emit::{emit, EmitOptions, OutputFormat};
pub use init::{init_description, InitOptions, InitResult};
pub use resolve::{build_manifest, resolve_description, ResolveResult};
