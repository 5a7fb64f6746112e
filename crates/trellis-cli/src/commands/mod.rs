//! Subcommand handlers. Each module exposes an `execute` entry point.

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod new;

use std::sync::Arc;

use tracing::debug;

use trellis_adapters::{InMemoryBlueprintStore, builtin_blueprints};
use trellis_core::{application::BlueprintStore, error::TrellisError};

use crate::{config::AppConfig, error::CliResult};

/// Registry of compiled-in blueprints plus any user blueprints found in
/// `$TRELLIS_BLUEPRINTS_DIR` or `blueprints.local_path`. User blueprints
/// replace built-ins of the same name.
pub fn blueprint_store(config: &AppConfig) -> CliResult<Arc<InMemoryBlueprintStore>> {
    let store = InMemoryBlueprintStore::with_builtin()?;

    let user = builtin_blueprints::user_blueprints(config.blueprints.local_path.as_deref())
        .map_err(TrellisError::from)?;
    for blueprint in user {
        debug!(name = blueprint.name(), "Registering user blueprint");
        store.insert(blueprint)?;
    }

    Ok(Arc::new(store))
}
