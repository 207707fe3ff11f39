//! Extension kinds and root-hook lifecycle slots.

use std::fmt;

/// The closed set of extension points a candidate module may contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtensionKind {
    /// Lifecycle callbacks merged into the root suite.
    RootHooks,
    /// Callables run once before anything else.
    GlobalSetup,
    /// Callables run once after everything else.
    GlobalTeardown,
}

impl ExtensionKind {
    /// All kinds, in the order `load` evaluates them.
    pub const ALL: [ExtensionKind; 3] = [
        ExtensionKind::RootHooks,
        ExtensionKind::GlobalSetup,
        ExtensionKind::GlobalTeardown,
    ];

    /// Property name a candidate module exports this kind under.
    pub fn export_name(&self) -> &'static str {
        match self {
            Self::RootHooks => "mochaHooks",
            Self::GlobalSetup => "mochaGlobalSetup",
            Self::GlobalTeardown => "mochaGlobalTeardown",
        }
    }

    /// Field name used for this kind in the finalized result.
    pub fn result_field(&self) -> &'static str {
        match self {
            Self::RootHooks => "rootHooks",
            Self::GlobalSetup => "globalSetup",
            Self::GlobalTeardown => "globalTeardown",
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.export_name())
    }
}

/// The four root-hook slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleHook {
    /// Runs once before all tests.
    BeforeAll,
    /// Runs before each test.
    BeforeEach,
    /// Runs once after all tests.
    AfterAll,
    /// Runs after each test.
    AfterEach,
}

impl LifecycleHook {
    /// All slots in merge order.
    pub const ALL: [LifecycleHook; 4] = [
        LifecycleHook::BeforeAll,
        LifecycleHook::BeforeEach,
        LifecycleHook::AfterAll,
        LifecycleHook::AfterEach,
    ];

    /// Property name inside a root-hook mapping.
    pub fn key(&self) -> &'static str {
        match self {
            Self::BeforeAll => "beforeAll",
            Self::BeforeEach => "beforeEach",
            Self::AfterAll => "afterAll",
            Self::AfterEach => "afterEach",
        }
    }
}

impl fmt::Display for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_names() {
        let names: Vec<_> = ExtensionKind::ALL.iter().map(|k| k.export_name()).collect();
        assert_eq!(names, ["mochaHooks", "mochaGlobalSetup", "mochaGlobalTeardown"]);
        assert_eq!(ExtensionKind::GlobalTeardown.to_string(), "mochaGlobalTeardown");
    }

    #[test]
    fn test_result_fields() {
        assert_eq!(ExtensionKind::RootHooks.result_field(), "rootHooks");
        assert_eq!(ExtensionKind::GlobalSetup.result_field(), "globalSetup");
    }

    #[test]
    fn test_lifecycle_keys() {
        let keys: Vec<_> = LifecycleHook::ALL.iter().map(|h| h.key()).collect();
        assert_eq!(keys, ["beforeAll", "beforeEach", "afterAll", "afterEach"]);
    }
}
