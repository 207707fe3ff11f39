//! Plugin loader — accumulates contributions from candidate modules and
//! merges them on demand.
//!
//! `load` is synchronous and append-only. `finalize` is the only async
//! operation: it invokes root-hook factories concurrently and merges the
//! results strictly in load order. The loader can be finalized any number
//! of times, and loading after a finalize is allowed.

use std::collections::HashMap;

use futures::future::try_join_all;
use tracing::{debug, info};

use testhost_core::types::Export;

use crate::contribution::{Contribution, HookSet, RootHooksContribution, SetupContribution};
use crate::error::PluginResult;
use crate::finalized::FinalizedPlugins;
use crate::kinds::ExtensionKind;

/// Registry of contributions, keyed by extension kind.
#[derive(Debug, Clone)]
pub struct PluginLoader {
    /// Kind → contributions in load order. All three kinds are always present.
    contributions: HashMap<ExtensionKind, Vec<Contribution>>,
}

impl PluginLoader {
    /// Creates a loader with no contributions.
    pub fn new() -> Self {
        Self {
            contributions: ExtensionKind::ALL
                .into_iter()
                .map(|kind| (kind, Vec::new()))
                .collect(),
        }
    }

    /// Alias of [`PluginLoader::new`].
    pub fn create() -> Self {
        Self::new()
    }

    /// Inspects a candidate module and accumulates whatever it contributes.
    ///
    /// Non-object candidates and unrelated exports are ignored. Kinds are
    /// checked in [`ExtensionKind::ALL`] order and the first invalid one
    /// aborts the call; kinds accepted before it stay loaded.
    pub fn load(&mut self, candidate: &Export) -> PluginResult<()> {
        if !candidate.is_object() {
            return Ok(());
        }

        for kind in ExtensionKind::ALL {
            let Some(value) = candidate.get(kind.export_name()).filter(|v| v.is_truthy()) else {
                continue;
            };

            let contribution = Contribution::parse(kind, value)?;
            debug!(kind = %kind, shape = value.type_name(), "Plugin contribution accepted");

            self.contributions.entry(kind).or_default().push(contribution);
        }

        Ok(())
    }

    /// Contributions accumulated for `kind`, in load order.
    pub fn contributions(&self, kind: ExtensionKind) -> &[Contribution] {
        self.contributions
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of contributions accumulated for `kind`.
    pub fn contribution_count(&self, kind: ExtensionKind) -> usize {
        self.contributions(kind).len()
    }

    /// Returns whether nothing has been contributed to any kind.
    pub fn is_empty(&self) -> bool {
        ExtensionKind::ALL
            .iter()
            .all(|kind| self.contribution_count(*kind) == 0)
    }

    /// Produces the merged result.
    ///
    /// Kinds without contributions are absent from the result. If any
    /// root-hook factory fails, its error is returned and nothing is merged.
    pub async fn finalize(&self) -> PluginResult<FinalizedPlugins> {
        let mut finalized = FinalizedPlugins::default();

        let root_hooks = self.root_hooks();
        if !root_hooks.is_empty() {
            finalized.root_hooks = Some(aggregate_root_hooks(&root_hooks).await?);
        }

        let global_setup = self.setup_contributions(ExtensionKind::GlobalSetup);
        if !global_setup.is_empty() {
            finalized.global_setup = Some(global_setup);
        }

        let global_teardown = self.setup_contributions(ExtensionKind::GlobalTeardown);
        if !global_teardown.is_empty() {
            finalized.global_teardown = Some(global_teardown);
        }

        for kind in ExtensionKind::ALL {
            if self.contribution_count(kind) == 0 {
                debug!(field = kind.result_field(), "No contributions, field omitted");
            }
        }

        info!(
            root_hooks = self.contribution_count(ExtensionKind::RootHooks),
            global_setup = self.contribution_count(ExtensionKind::GlobalSetup),
            global_teardown = self.contribution_count(ExtensionKind::GlobalTeardown),
            "Plugins finalized"
        );

        Ok(finalized)
    }

    fn root_hooks(&self) -> Vec<&RootHooksContribution> {
        self.contributions(ExtensionKind::RootHooks)
            .iter()
            .filter_map(|c| match c {
                Contribution::RootHooks(hooks) => Some(hooks),
                _ => None,
            })
            .collect()
    }

    fn setup_contributions(&self, kind: ExtensionKind) -> Vec<SetupContribution> {
        self.contributions(kind)
            .iter()
            .filter_map(|c| match c {
                Contribution::GlobalSetup(s) | Contribution::GlobalTeardown(s) => Some(s.clone()),
                Contribution::RootHooks(_) => None,
            })
            .collect()
    }
}

impl Default for PluginLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves every contribution concurrently, then concatenates by index.
async fn aggregate_root_hooks(contributions: &[&RootHooksContribution]) -> PluginResult<HookSet> {
    let resolved = try_join_all(contributions.iter().map(|c| c.resolve())).await?;

    let mut merged = HookSet::new();
    for hooks in &resolved {
        merged.extend(hooks);
    }

    debug!(
        contributions = resolved.len(),
        hooks = merged.len(),
        "Root hooks aggregated"
    );

    Ok(merged)
}
