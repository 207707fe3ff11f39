//! Typed contributions and the per-kind shape validators.
//!
//! Raw exports are checked and normalized here once, at load time, so the
//! loader never has to re-inspect shapes when finalizing.

use testhost_core::types::{Callable, Export};

use crate::error::{PluginError, PluginResult};
use crate::kinds::{ExtensionKind, LifecycleHook};

const ROOT_HOOKS_SHAPE: &str =
    "must be an object or a function returning (or fulfilling with) an object";
const CALLABLES_SHAPE: &str = "must be a function or an array of functions";

/// Root hooks normalized to one ordered list per lifecycle slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookSet {
    /// `beforeAll` hooks.
    pub before_all: Vec<Callable>,
    /// `beforeEach` hooks.
    pub before_each: Vec<Callable>,
    /// `afterAll` hooks.
    pub after_all: Vec<Callable>,
    /// `afterEach` hooks.
    pub after_each: Vec<Callable>,
}

impl HookSet {
    /// Creates an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks registered for a slot, in order.
    pub fn get(&self, hook: LifecycleHook) -> &[Callable] {
        match hook {
            LifecycleHook::BeforeAll => &self.before_all,
            LifecycleHook::BeforeEach => &self.before_each,
            LifecycleHook::AfterAll => &self.after_all,
            LifecycleHook::AfterEach => &self.after_each,
        }
    }

    fn slot_mut(&mut self, hook: LifecycleHook) -> &mut Vec<Callable> {
        match hook {
            LifecycleHook::BeforeAll => &mut self.before_all,
            LifecycleHook::BeforeEach => &mut self.before_each,
            LifecycleHook::AfterAll => &mut self.after_all,
            LifecycleHook::AfterEach => &mut self.after_each,
        }
    }

    /// Appends a hook to a slot.
    pub fn push(&mut self, hook: LifecycleHook, callable: Callable) {
        self.slot_mut(hook).push(callable);
    }

    /// Appends every slot of `other` after the hooks already present.
    pub fn extend(&mut self, other: &HookSet) {
        for hook in LifecycleHook::ALL {
            self.slot_mut(hook).extend_from_slice(other.get(hook));
        }
    }

    /// Total number of hooks across all slots.
    pub fn len(&self) -> usize {
        LifecycleHook::ALL.iter().map(|h| self.get(*h).len()).sum()
    }

    /// Returns whether no slot holds a hook.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalizes a root-hook mapping.
    ///
    /// Unknown keys are ignored. Each lifecycle key may be absent, falsy,
    /// a function, or an array of functions.
    pub fn from_export(value: &Export) -> PluginResult<Self> {
        let Export::Object(map) = value else {
            return Err(PluginError::unsupported_shape(
                ExtensionKind::RootHooks,
                format!("{} {ROOT_HOOKS_SHAPE}", ExtensionKind::RootHooks),
            ));
        };

        let mut hooks = Self::new();
        for hook in LifecycleHook::ALL {
            let Some(entry) = map.get(hook.key()).filter(|v| v.is_truthy()) else {
                continue;
            };
            let subject = format!("{}.{}", ExtensionKind::RootHooks, hook);
            for callable in callables_of(ExtensionKind::RootHooks, &subject, entry)? {
                hooks.push(hook, callable);
            }
        }
        Ok(hooks)
    }
}

/// A `mochaHooks` contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootHooksContribution {
    /// A mapping given directly.
    Direct(HookSet),
    /// A function producing the mapping when finalized.
    Factory(Callable),
}

impl RootHooksContribution {
    /// Validates a raw `mochaHooks` export.
    pub fn parse(value: &Export) -> PluginResult<Self> {
        match value {
            Export::Function(factory) => Ok(Self::Factory(factory.clone())),
            Export::Object(_) => HookSet::from_export(value).map(Self::Direct),
            _ => Err(PluginError::unsupported_shape(
                ExtensionKind::RootHooks,
                format!("{} {ROOT_HOOKS_SHAPE}", ExtensionKind::RootHooks),
            )),
        }
    }

    /// Produces the hook set, invoking the factory if there is one.
    ///
    /// Factory failures are returned unchanged as
    /// [`PluginError::Contribution`].
    pub async fn resolve(&self) -> PluginResult<HookSet> {
        match self {
            Self::Direct(hooks) => Ok(hooks.clone()),
            Self::Factory(factory) => {
                let value = factory.call().await.map_err(PluginError::Contribution)?;
                if !value.is_object() {
                    return Err(PluginError::unsupported_shape(
                        ExtensionKind::RootHooks,
                        format!(
                            "{} function must return (or fulfill with) an object, got {}",
                            ExtensionKind::RootHooks,
                            value.type_name()
                        ),
                    ));
                }
                HookSet::from_export(&value)
            }
        }
    }
}

/// A `mochaGlobalSetup` or `mochaGlobalTeardown` contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupContribution {
    /// A lone function.
    Single(Callable),
    /// An array of functions, kept as one contribution.
    Many(Vec<Callable>),
}

impl SetupContribution {
    /// Validates a raw setup or teardown export for `kind`.
    pub fn parse(kind: ExtensionKind, value: &Export) -> PluginResult<Self> {
        match value {
            Export::Function(f) => Ok(Self::Single(f.clone())),
            Export::Array(_) => callables_of(kind, kind.export_name(), value).map(Self::Many),
            _ => Err(PluginError::unsupported_shape(
                kind,
                format!("{kind} {CALLABLES_SHAPE}"),
            )),
        }
    }

    /// The callables of this contribution, in order.
    pub fn callables(&self) -> &[Callable] {
        match self {
            Self::Single(f) => std::slice::from_ref(f),
            Self::Many(fs) => fs,
        }
    }
}

/// A validated contribution tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contribution {
    /// A `mochaHooks` export.
    RootHooks(RootHooksContribution),
    /// A `mochaGlobalSetup` export.
    GlobalSetup(SetupContribution),
    /// A `mochaGlobalTeardown` export.
    GlobalTeardown(SetupContribution),
}

impl Contribution {
    /// Validates `value` against the shape `kind` requires.
    pub fn parse(kind: ExtensionKind, value: &Export) -> PluginResult<Self> {
        match kind {
            ExtensionKind::RootHooks => RootHooksContribution::parse(value).map(Self::RootHooks),
            ExtensionKind::GlobalSetup => {
                SetupContribution::parse(kind, value).map(Self::GlobalSetup)
            }
            ExtensionKind::GlobalTeardown => {
                SetupContribution::parse(kind, value).map(Self::GlobalTeardown)
            }
        }
    }
}

/// Reads a function or an array of functions.
fn callables_of(kind: ExtensionKind, subject: &str, value: &Export) -> PluginResult<Vec<Callable>> {
    let invalid = || PluginError::unsupported_shape(kind, format!("{subject} {CALLABLES_SHAPE}"));

    match value {
        Export::Function(f) => Ok(vec![f.clone()]),
        Export::Array(items) => items
            .iter()
            .map(|item| item.as_callable().cloned().ok_or_else(invalid))
            .collect(),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use testhost_core::error::AppError;

    use super::*;

    fn hook(name: &str) -> Callable {
        Callable::noop().with_name(name.to_string())
    }

    #[test]
    fn test_hook_set_accepts_function_or_array() {
        let a = hook("a");
        let b = hook("b");
        let c = hook("c");
        let value = Export::object([
            ("beforeAll", Export::from(a.clone())),
            ("afterEach", Export::array([b.clone(), c.clone()])),
            ("afterAll", Export::Null),
            ("timeout", Export::Number(500.0)),
        ]);

        let hooks = HookSet::from_export(&value).expect("valid hooks");
        assert_eq!(hooks.before_all, vec![a]);
        assert_eq!(hooks.after_each, vec![b, c]);
        assert!(hooks.before_each.is_empty());
        assert!(hooks.after_all.is_empty());
        assert_eq!(hooks.len(), 3);
    }

    #[test]
    fn test_hook_set_rejects_non_callable_slot() {
        let value = Export::object([("beforeEach", Export::array([Export::from("nope")]))]);

        let err = HookSet::from_export(&value).expect_err("should fail");
        assert_eq!(err.kind(), Some(ExtensionKind::RootHooks));
        assert_eq!(
            err.to_string(),
            "unsupported plugin shape: mochaHooks.beforeEach must be a function or an array of functions"
        );
    }

    #[test]
    fn test_root_hooks_rejects_array() {
        let value = Export::array([Export::object([("beforeAll", hook("a"))])]);

        let err = RootHooksContribution::parse(&value).expect_err("arrays are not allowed");
        assert_eq!(
            err.to_string(),
            "unsupported plugin shape: mochaHooks must be an object or a function returning (or fulfilling with) an object"
        );
    }

    #[test]
    fn test_root_hooks_rejects_scalars() {
        for value in [Export::Bool(true), Export::Number(1.0), Export::from("hooks")] {
            assert!(RootHooksContribution::parse(&value).is_err());
        }
    }

    #[test]
    fn test_setup_single_and_many() {
        let a = hook("a");
        let b = hook("b");

        let single = SetupContribution::parse(ExtensionKind::GlobalSetup, &Export::from(a.clone()))
            .expect("single");
        assert_eq!(single, SetupContribution::Single(a.clone()));
        assert_eq!(single.callables(), &[a.clone()]);

        let many = SetupContribution::parse(
            ExtensionKind::GlobalSetup,
            &Export::array([a.clone(), b.clone()]),
        )
        .expect("many");
        assert_eq!(many.callables(), &[a, b]);
    }

    #[test]
    fn test_setup_rejects_non_callable_element() {
        let value = Export::array([Export::from(hook("a")), Export::Number(3.0)]);

        let err = SetupContribution::parse(ExtensionKind::GlobalTeardown, &value)
            .expect_err("should fail");
        assert_eq!(err.kind(), Some(ExtensionKind::GlobalTeardown));
        assert_eq!(
            err.to_string(),
            "unsupported plugin shape: mochaGlobalTeardown must be a function or an array of functions"
        );
    }

    #[test]
    fn test_setup_rejects_object() {
        let value = Export::object([("run", hook("a"))]);
        assert!(SetupContribution::parse(ExtensionKind::GlobalSetup, &value).is_err());
    }

    #[test]
    fn test_empty_setup_array_is_valid() {
        let parsed = SetupContribution::parse(ExtensionKind::GlobalSetup, &Export::Array(vec![]))
            .expect("empty array");
        assert!(parsed.callables().is_empty());
    }

    #[tokio::test]
    async fn test_factory_resolves_async_mapping() {
        let a = hook("a");
        let returned = a.clone();
        let factory = Callable::new(move || {
            let returned = returned.clone();
            async move { Ok(Export::object([("afterAll", returned)])) }
        });

        let hooks = RootHooksContribution::Factory(factory)
            .resolve()
            .await
            .expect("resolves");
        assert_eq!(hooks.after_all, vec![a]);
    }

    #[tokio::test]
    async fn test_factory_error_passes_through() {
        let factory = Callable::sync(|| Err(AppError::internal("db unavailable")));

        let err = RootHooksContribution::Factory(factory)
            .resolve()
            .await
            .expect_err("should fail");
        match err {
            PluginError::Contribution(inner) => assert_eq!(inner.message, "db unavailable"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_factory_returning_non_object_is_shape_error() {
        let factory = Callable::sync(|| Ok(Export::Null));

        let err = RootHooksContribution::Factory(factory)
            .resolve()
            .await
            .expect_err("should fail");
        assert_eq!(err.kind(), Some(ExtensionKind::RootHooks));
    }
}
