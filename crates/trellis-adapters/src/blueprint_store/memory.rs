//! In-memory blueprint registry.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use trellis_core::{
    application::{ApplicationError, ports::BlueprintStore},
    domain::{Blueprint, DomainError, DomainValidator as validator},
    error::TrellisResult,
};

use crate::builtin_blueprints;

/// Thread-safe in-memory blueprint store.
///
/// Constructed explicitly and shared by `Arc`; clones share the same map.
#[derive(Clone)]
pub struct InMemoryBlueprintStore {
    inner: Arc<RwLock<HashMap<String, Blueprint>>>,
}

impl InMemoryBlueprintStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store with the built-in blueprints loaded.
    pub fn with_builtin() -> TrellisResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load built-in blueprints.
    pub fn load_builtin(&self) -> TrellisResult<()> {
        for blueprint in builtin_blueprints::all_blueprints()? {
            self.insert(blueprint)?;
        }
        Ok(())
    }

    /// Get the number of blueprints.
    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryBlueprintStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlueprintStore for InMemoryBlueprintStore {
    fn get(&self, name: &str) -> TrellisResult<Blueprint> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(name).cloned().ok_or_else(|| {
            DomainError::UnknownBlueprint {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> TrellisResult<Vec<Blueprint>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut all: Vec<Blueprint> = inner.values().cloned().collect();
        all.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
        Ok(all)
    }

    fn insert(&self, blueprint: Blueprint) -> TrellisResult<()> {
        validator::validate_blueprint(&blueprint)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.insert(blueprint.metadata.name.clone(), blueprint);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::domain::BlueprintMetadata;

    fn tiny(name: &str) -> Blueprint {
        Blueprint::builder()
            .metadata(BlueprintMetadata::new(name))
            .core("README.md", "# {{PROJECT_NAME}}")
            .build()
            .unwrap()
    }

    #[test]
    fn get_returns_inserted_blueprint() {
        let store = InMemoryBlueprintStore::new();
        store.insert(tiny("a")).unwrap();
        assert_eq!(store.get("a").unwrap().name(), "a");
    }

    #[test]
    fn get_unknown_is_unknown_blueprint() {
        let err = InMemoryBlueprintStore::new().get("missing").unwrap_err();
        assert_eq!(err.code(), "unknown-blueprint");
    }

    #[test]
    fn list_is_sorted_by_name() {
        let store = InMemoryBlueprintStore::new();
        store.insert(tiny("zeta")).unwrap();
        store.insert(tiny("alpha")).unwrap();
        let names: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|b| b.metadata.name)
            .collect();
        assert_eq!(names, ["alpha", "zeta"]);
    }

    #[test]
    fn insert_replaces_same_name() {
        let store = InMemoryBlueprintStore::new();
        store.insert(tiny("a")).unwrap();
        store.insert(tiny("a")).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn builtin_store_has_default() {
        let store = InMemoryBlueprintStore::with_builtin().unwrap();
        assert!(store.get("default").is_ok());
    }
}
