//! `package.json` manifest writer.

use std::collections::BTreeMap;

use serde::Serialize;

use trellis_core::{
    application::{ApplicationError, ports::ManifestWriter},
    domain::{FileToWrite, RelativePath},
    error::TrellisResult,
};

/// Serialized shape of the generated `package.json`.
#[derive(Debug, Serialize)]
struct PackageManifest<'a> {
    name: &'a str,
    version: &'a str,
    private: bool,
    scripts: BTreeMap<&'static str, &'static str>,
}

/// Emits a minimal `package.json` named after the package identity.
#[derive(Debug, Clone)]
pub struct JsonManifestWriter {
    file_name: String,
    version: String,
}

impl JsonManifestWriter {
    pub fn new() -> Self {
        Self {
            file_name: "package.json".to_string(),
            version: "0.0.0".to_string(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl Default for JsonManifestWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestWriter for JsonManifestWriter {
    fn manifest(&self, package_name: &str) -> TrellisResult<FileToWrite> {
        let manifest = PackageManifest {
            name: package_name,
            version: &self.version,
            private: true,
            scripts: BTreeMap::from([
                ("build", "tsc -p tsconfig.json"),
                ("start", "tsc -p tsconfig.json --watch"),
                ("test", "jest"),
            ]),
        };

        let mut content = serde_json::to_string_pretty(&manifest).map_err(|e| {
            ApplicationError::ManifestFailed {
                reason: e.to_string(),
            }
        })?;
        content.push('\n');

        Ok(FileToWrite::new(RelativePath::try_new(&self.file_name)?, content))
    }
}
