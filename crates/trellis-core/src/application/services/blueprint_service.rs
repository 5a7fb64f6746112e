//! Blueprint resolution and listing.
//!
//! Separated from ScaffoldService for single responsibility.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::ports::BlueprintStore,
    domain::{Blueprint, DomainValidator, FileCategory},
    error::TrellisResult,
};

/// Blueprint summary for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlueprintInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    pub entries: usize,
    pub optional_categories: Vec<FileCategory>,
}

impl From<&Blueprint> for BlueprintInfo {
    fn from(bp: &Blueprint) -> Self {
        let mut optional: Vec<FileCategory> = bp
            .entries
            .iter()
            .map(|e| e.category)
            .filter(|c| *c != FileCategory::Core)
            .collect();
        optional.sort_by_key(|c| c.as_str());
        optional.dedup();

        Self {
            name: bp.metadata.name.clone(),
            description: bp.metadata.description.clone(),
            version: bp.metadata.version.clone(),
            entries: bp.entries.len(),
            optional_categories: optional,
        }
    }
}

/// Maps blueprint names to manifests through an explicitly shared store.
#[derive(Clone)]
pub struct BlueprintResolver {
    store: Arc<dyn BlueprintStore>,
}

impl BlueprintResolver {
    pub fn new(store: Arc<dyn BlueprintStore>) -> Self {
        Self { store }
    }

    /// Resolve a blueprint by name.
    ///
    /// # Errors
    ///
    /// `UnknownBlueprint` if nothing is registered under `name`.
    #[instrument(skip(self))]
    pub fn resolve(&self, name: &str) -> TrellisResult<Blueprint> {
        let blueprint = self.store.get(name)?;
        DomainValidator::validate_blueprint(&blueprint)?;
        debug!(
            entries = blueprint.entries.len(),
            renames = blueprint.renames.len(),
            "Blueprint resolved"
        );
        Ok(blueprint)
    }

    /// Summaries of every registered blueprint.
    pub fn list(&self) -> TrellisResult<Vec<BlueprintInfo>> {
        Ok(self.store.list()?.iter().map(BlueprintInfo::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockBlueprintStore;
    use crate::domain::{BlueprintMetadata, DomainError};
    use crate::error::TrellisError;

    fn web() -> Blueprint {
        Blueprint::builder()
            .metadata(BlueprintMetadata::new("web").description("Web app"))
            .core("index.html", "<html></html>")
            .file("app.css", FileCategory::StyleBody, "")
            .file("app.spec.ts", FileCategory::Spec, "")
            .build()
            .unwrap()
    }

    #[test]
    fn resolves_registered_blueprint() {
        let mut store = MockBlueprintStore::new();
        store
            .expect_get()
            .withf(|name| name == "web")
            .returning(|_| Ok(web()));

        let resolver = BlueprintResolver::new(Arc::new(store));
        let bp = resolver.resolve("web").unwrap();
        assert_eq!(bp.name(), "web");
    }

    #[test]
    fn unknown_name_propagates_store_error() {
        let mut store = MockBlueprintStore::new();
        store.expect_get().returning(|name| {
            Err(DomainError::UnknownBlueprint {
                name: name.to_string(),
            }
            .into())
        });

        let resolver = BlueprintResolver::new(Arc::new(store));
        let err = resolver.resolve("nope").unwrap_err();
        assert!(matches!(
            err,
            TrellisError::Domain(DomainError::UnknownBlueprint { .. })
        ));
    }

    #[test]
    fn list_summarises_optional_categories() {
        let mut store = MockBlueprintStore::new();
        store.expect_list().returning(|| Ok(vec![web()]));

        let resolver = BlueprintResolver::new(Arc::new(store));
        let infos = resolver.list().unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].entries, 3);
        assert_eq!(
            infos[0].optional_categories,
            vec![FileCategory::Spec, FileCategory::StyleBody]
        );
    }
}
