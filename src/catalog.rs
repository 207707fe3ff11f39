//! Compiled-in candidate modules the host can offer to the plugin loader.

use std::collections::BTreeMap;

use testhost_plugin::prelude::{Callable, Export};

/// Builds the exports of one module.
type ModuleFactory = fn() -> Export;

/// Name → module exports.
#[derive(Debug, Clone)]
pub struct ModuleCatalog {
    modules: BTreeMap<&'static str, ModuleFactory>,
}

impl ModuleCatalog {
    /// Catalog of the modules shipped with the host.
    pub fn builtin() -> Self {
        let mut modules: BTreeMap<&'static str, ModuleFactory> = BTreeMap::new();
        modules.insert("timing", timing_module);
        modules.insert("fixtures", fixtures_module);
        modules.insert("helpers", helpers_module);
        modules.insert("banner", banner_module);
        Self { modules }
    }

    /// Exports of the named module, if it exists.
    pub fn resolve(&self, name: &str) -> Option<Export> {
        self.modules.get(name).map(|build| build())
    }

    /// Known module names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.modules.keys().copied().collect()
    }
}

/// Root hooks produced lazily by a factory.
fn timing_module() -> Export {
    let factory = Callable::new(|| async {
        let before = Callable::sync(|| {
            tracing::debug!("test started");
            Ok(Export::Null)
        })
        .with_name("timing.beforeEach");
        let after = Callable::sync(|| {
            tracing::debug!("test finished");
            Ok(Export::Null)
        })
        .with_name("timing.afterEach");

        Ok(Export::object([("beforeEach", before), ("afterEach", after)]))
    })
    .with_name("timing.mochaHooks");

    Export::object([("mochaHooks", factory)])
}

/// Global setup and teardown pair.
fn fixtures_module() -> Export {
    let start = Callable::sync(|| {
        tracing::info!("fixtures: starting");
        Ok(Export::Null)
    })
    .with_name("fixtures.start");
    let seed = Callable::sync(|| {
        tracing::info!("fixtures: seeding");
        Ok(Export::Null)
    })
    .with_name("fixtures.seed");
    let stop = Callable::sync(|| {
        tracing::info!("fixtures: stopping");
        Ok(Export::Null)
    })
    .with_name("fixtures.stop");

    Export::object([
        ("mochaGlobalSetup", Export::array([start, seed])),
        ("mochaGlobalTeardown", Export::from(stop)),
    ])
}

/// A single setup function.
fn banner_module() -> Export {
    let print = Callable::sync(|| {
        tracing::info!("testhost v{}", env!("CARGO_PKG_VERSION"));
        Ok(Export::Null)
    })
    .with_name("banner.print");

    Export::object([("mochaGlobalSetup", print)])
}

/// Exports nothing the loader understands.
fn helpers_module() -> Export {
    Export::object([
        ("version", Export::from(env!("CARGO_PKG_VERSION"))),
        ("noop", Export::from(Callable::noop())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        assert_eq!(
            ModuleCatalog::builtin().names(),
            vec!["banner", "fixtures", "helpers", "timing"]
        );
    }

    #[test]
    fn test_unknown_module() {
        assert!(ModuleCatalog::builtin().resolve("missing").is_none());
    }

    #[test]
    fn test_fixtures_exports() {
        let exports = ModuleCatalog::builtin().resolve("fixtures").expect("builtin");
        assert!(matches!(exports.get("mochaGlobalSetup"), Some(Export::Array(items)) if items.len() == 2));
        assert!(matches!(exports.get("mochaGlobalTeardown"), Some(Export::Function(_))));
    }
}
