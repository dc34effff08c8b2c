//! Shelf application library
//!
//! The books resource, its validation chains and the bootstrap used by the
//! `shelf-app` binary and the `shelf` CLI.

pub mod bootstrap;
pub mod extract;
pub mod modules;
pub mod validation;

/// Re-export commonly used types
pub use modules::*;
