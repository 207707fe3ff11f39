//! The merged result handed to the host.

use serde::Serialize;

use testhost_core::types::Callable;

use crate::contribution::{HookSet, SetupContribution};
use crate::kinds::LifecycleHook;

/// Output of [`PluginLoader::finalize`](crate::PluginLoader::finalize).
///
/// A field is `None` when nothing was contributed to that kind, and
/// `Some` (possibly holding empty lists) otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalizedPlugins {
    /// All root hooks, concatenated in load order.
    pub root_hooks: Option<HookSet>,
    /// Setup contributions in load order, one entry per contribution.
    pub global_setup: Option<Vec<SetupContribution>>,
    /// Teardown contributions in load order, one entry per contribution.
    pub global_teardown: Option<Vec<SetupContribution>>,
}

impl FinalizedPlugins {
    /// Global setup callables flattened across contributions.
    pub fn global_setup_callables(&self) -> Vec<Callable> {
        flatten(self.global_setup.as_deref())
    }

    /// Global teardown callables flattened across contributions.
    pub fn global_teardown_callables(&self) -> Vec<Callable> {
        flatten(self.global_teardown.as_deref())
    }

    /// Counts per field, for reporting.
    pub fn summary(&self) -> PluginSummary {
        PluginSummary {
            root_hooks: self.root_hooks.as_ref().map(RootHookCounts::from),
            global_setup: self.global_setup.as_ref().map(Vec::len),
            global_teardown: self.global_teardown.as_ref().map(Vec::len),
        }
    }
}

fn flatten(contributions: Option<&[SetupContribution]>) -> Vec<Callable> {
    contributions
        .unwrap_or_default()
        .iter()
        .flat_map(|c| c.callables().iter().cloned())
        .collect()
}

/// Serializable overview of a [`FinalizedPlugins`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSummary {
    /// Hook counts, when any root hooks were contributed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_hooks: Option<RootHookCounts>,
    /// Number of setup contributions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_setup: Option<usize>,
    /// Number of teardown contributions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_teardown: Option<usize>,
}

/// Hook count per lifecycle slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootHookCounts {
    /// Number of `beforeAll` hooks.
    pub before_all: usize,
    /// Number of `beforeEach` hooks.
    pub before_each: usize,
    /// Number of `afterAll` hooks.
    pub after_all: usize,
    /// Number of `afterEach` hooks.
    pub after_each: usize,
}

impl From<&HookSet> for RootHookCounts {
    fn from(hooks: &HookSet) -> Self {
        Self {
            before_all: hooks.get(LifecycleHook::BeforeAll).len(),
            before_each: hooks.get(LifecycleHook::BeforeEach).len(),
            after_all: hooks.get(LifecycleHook::AfterAll).len(),
            after_each: hooks.get(LifecycleHook::AfterEach).len(),
        }
    }
}
