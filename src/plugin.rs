use std::any::Any;
use std::collections::BTreeMap;

use tracing::debug;

use crate::github::GitHubFacade;

/// Something review scripts can reach by name.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

impl Plugin for GitHubFacade {
    fn name(&self) -> &'static str {
        GitHubFacade::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Name-indexed plugins exposed to a review run.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<&'static str, Box<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin under its own name, replacing any previous holder.
    pub fn register<P: Plugin + 'static>(&mut self, plugin: P) {
        let name = plugin.name();
        if self.plugins.insert(name, Box::new(plugin)).is_some() {
            debug!(plugin = name, "replaced registered plugin");
        } else {
            debug!(plugin = name, "registered plugin");
        }
    }

    /// Look a plugin up by name and concrete type.
    pub fn get<P: Plugin + 'static>(&self, name: &str) -> Option<&P> {
        self.plugins.get(name)?.as_any().downcast_ref::<P>()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.plugins.keys().copied()
    }
}
