//! Command implementations for the fob-mixins CLI.
//!
//! - [`check`] - List matching components and their mixins
//! - [`transform`] - Rewrite one component
//! - [`build`] - Rewrite all matching components in parallel
//!
//! Each command provides an `execute` function taking its parsed arguments
//! plus the global `--root` and `--config` values.

pub mod build;
pub mod check;
pub mod transform;
pub(crate) mod utils;

// Re-export execute functions for convenience
pub use build::execute as build_execute;
pub use check::execute as check_execute;
pub use transform::execute as transform_execute;
