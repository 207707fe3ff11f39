//! # testhost-plugin
//!
//! Plugin registration for the TestHost runner. Candidate modules may
//! contribute to exactly three extension points:
//!
//! - root hooks (`mochaHooks`): lifecycle callbacks merged across modules
//! - global setup (`mochaGlobalSetup`): callables run once before everything
//! - global teardown (`mochaGlobalTeardown`): callables run once after everything
//!
//! [`PluginLoader::load`] validates and accumulates contributions;
//! [`PluginLoader::finalize`] resolves root-hook factories and produces the
//! merged [`FinalizedPlugins`]. Nothing here runs the hooks themselves.

pub mod contribution;
pub mod error;
pub mod finalized;
pub mod kinds;
pub mod loader;
pub mod prelude;

pub use contribution::{Contribution, HookSet, RootHooksContribution, SetupContribution};
pub use error::{PluginError, PluginResult};
pub use finalized::{FinalizedPlugins, PluginSummary, RootHookCounts};
pub use kinds::{ExtensionKind, LifecycleHook};
pub use loader::PluginLoader;
