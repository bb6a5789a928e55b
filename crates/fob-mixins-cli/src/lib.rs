//! fob-mixins CLI - mixin injection for Vue single file components.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions
//! - [`commands`] - `check`, `transform` and `build`
//! - [`error`] - CLI error type rendered through miette
//! - [`logger`] - tracing setup
//! - [`ui`] - status messages

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
