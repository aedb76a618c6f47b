//! # Lexis Common
//!
//! Shared data model and utilities for the Lexis translation engine.
//!
//! This crate provides the value types stored per `(locale, key)` pair, the
//! caller-supplied interpolation arguments, and the key/namespace helpers used
//! by every other crate in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use types::*;
pub use utils::*;
