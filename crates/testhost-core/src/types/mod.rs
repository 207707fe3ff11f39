//! Core type definitions used across the TestHost workspace.

pub mod callable;
pub mod export;

pub use callable::{Callable, HookFn};
pub use export::{Export, ExportMap};
