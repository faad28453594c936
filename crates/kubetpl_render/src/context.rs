//! Template variables.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use kubetpl_resources::Variables;

/// Variables visible to every template of a run.
///
/// Starts from the manifest's `global` mapping; command-line assignments
/// are layered on top in order, so the last one for a key wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    variables: BTreeMap<String, Value>,
}

impl RenderContext {
    /// Create a context from the manifest's globals.
    pub fn new(globals: Variables) -> Self {
        Self { variables: globals }
    }

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(previous) = self.variables.insert(key.clone(), value.clone()) {
            debug!("Variable {} overridden: {} -> {}", key, previous, value);
        }
    }

    /// Apply `key=value` overrides in order.
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in overrides {
            self.set(key, value);
        }
        self
    }

    /// Get a variable's value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Convert into the context handed to tera.
    pub fn to_tera_context(&self) -> tera::Context {
        let mut context = tera::Context::new();
        for (key, value) in &self.variables {
            context.insert(key.as_str(), value);
        }
        context
    }
}
