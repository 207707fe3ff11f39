//! # testhost-core
//!
//! Core crate for TestHost. Contains the unified error system,
//! configuration schemas, and the dynamic export model that candidate
//! modules are described with.
//!
//! This crate has **no** internal dependencies on other TestHost crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use types::{Callable, Export};
