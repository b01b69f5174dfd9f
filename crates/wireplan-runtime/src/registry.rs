//! Name-keyed component registry

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{RuntimeError, RuntimeResult};

/// Immutable name-to-instance map produced by generated initialization
///
/// The generated initializer constructs every component, registers each one
/// under its allocated identifier, and hands the finished registry to the
/// caller. Nothing ambient: whoever holds the registry owns the components.
pub struct Registry {
    components: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl Registry {
    /// Start building a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Look up a component by registration name
    pub fn get<T>(&self, name: &str) -> RuntimeResult<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let instance = self
            .components
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownComponent {
                name: name.to_string(),
            })?;
        instance
            .clone()
            .downcast::<T>()
            .map_err(|_| RuntimeError::TypeMismatch {
                name: name.to_string(),
            })
    }

    /// Whether a component is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Number of registered components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Builder used by generated initialization to fill a [`Registry`]
#[derive(Default)]
pub struct RegistryBuilder {
    components: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

// `Arc<dyn Any>` has no `Debug`, so derive is unavailable; show the names.
impl std::fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("components", &self.components.keys())
            .finish()
    }
}

impl RegistryBuilder {
    /// Empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `instance` under `name`
    ///
    /// Fails with [`RuntimeError::DuplicateName`] when the name is taken;
    /// identifier allocation upstream guarantees generated code never hits it.
    pub fn register<T>(mut self, name: impl Into<String>, instance: Arc<T>) -> RuntimeResult<Self>
    where
        T: Send + Sync + 'static,
    {
        let name = name.into();
        if self.components.contains_key(&name) {
            return Err(RuntimeError::DuplicateName { name });
        }
        debug!("Registered component: {}", name);
        self.components
            .insert(name, instance as Arc<dyn Any + Send + Sync>);
        Ok(self)
    }

    /// Finish building
    pub fn build(self) -> Registry {
        Registry {
            components: self.components,
        }
    }
}
