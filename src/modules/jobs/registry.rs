/// Registry of job hooks, keyed by hook name
use crate::modules::jobs::domain::hook::JobHook;
use crate::log_warn;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct JobRegistry {
    hooks: HashMap<String, Arc<dyn JobHook>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook under its own name, replacing any previous one
    pub fn register(&mut self, hook: Arc<dyn JobHook>) {
        let name = hook.name().to_string();
        if self.hooks.insert(name.clone(), hook).is_some() {
            log_warn!("Job hook '{}' registered twice, keeping the latest", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn JobHook>> {
        self.hooks.get(name).cloned()
    }

    /// Registered hook names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
