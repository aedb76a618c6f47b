//! # Lexis Config
//!
//! Type-safe settings for the Lexis translation engine.
//!
//! This crate provides the settings schema with its defaults, validation,
//! the resource filename format compiler, file loading and saving, and a
//! lock-free cache publishing the active settings.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod filename;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use filename::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
