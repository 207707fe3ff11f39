//! Prelude for convenient imports.

pub use testhost_core::error::AppError;
pub use testhost_core::result::AppResult;
pub use testhost_core::types::{Callable, Export, ExportMap, HookFn};

pub use crate::contribution::{HookSet, SetupContribution};
pub use crate::error::PluginError;
pub use crate::finalized::FinalizedPlugins;
pub use crate::kinds::{ExtensionKind, LifecycleHook};
pub use crate::loader::PluginLoader;
