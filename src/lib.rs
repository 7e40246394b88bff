//! Command-line tool conveniences: keyword disambiguation, gated
//! diagnostics, and shell command execution wrappers.

pub mod core;

// Re-export everything from core for ergonomic library use
// Users can write `cmdkit::lookup` instead of `cmdkit::core::lookup`
pub use core::*;
