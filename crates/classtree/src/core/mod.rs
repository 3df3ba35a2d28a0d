//! Core abstractions for class graph processing
//!
//! This module defines the traits every class graph consumer relies on, the
//! shared configuration types, errors and logging setup.

pub mod chumsky_utils;
mod database;
mod error;
pub mod logging;
mod renderer;
mod types;

pub use database::*;
pub use error::*;
pub use logging::*;
pub use renderer::*;
pub use types::*;
