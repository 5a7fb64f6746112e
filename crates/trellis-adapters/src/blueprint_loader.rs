//! Filesystem-based blueprint loader.
//!
//! Discovers and parses `blueprint.toml` manifests from a directory tree,
//! converting them into domain [`Blueprint`] objects.
//!
//! # Directory layout expected
//!
//! ```text
//! blueprints/
//! ├── web-app/
//! │   ├── blueprint.toml       ← manifest (required)
//! │   └── files/               ← project files (required)
//! │       ├── gitignore
//! │       └── src/
//! │           ├── __name__.ts
//! │           └── app.component.html
//! └── library/
//!     ├── blueprint.toml
//!     └── files/
//!         └── README.md
//! ```
//!
//! # `blueprint.toml` format
//!
//! ```toml
//! [blueprint]
//! name        = "web-app"
//! version     = "1.0.0"              # optional
//! description = "Small web app"      # optional
//! install     = ["npm", "install"]   # optional
//!
//! # Files not listed here are `core`.
//! [[entries]]
//! path     = "src/app.component.html"
//! category = "template-body"         # core | template-body | style-body | spec
//!
//! [[entries]]
//! path        = "src/app.component.spec.ts"
//! category    = "spec"
//! destination = "test/__name__.spec.ts"   # optional output template
//!
//! [renames]
//! "gitignore" = ".gitignore"
//! ```
//!
//! Files that are not valid UTF-8 (icons, images) are copied byte for byte,
//! with no token substitution.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use trellis_core::domain::{
    Blueprint, BlueprintEntry, BlueprintMetadata, DomainError, FileCategory, RelativePath,
    TemplateSource,
};

/// Manifest file name inside each blueprint directory.
pub const MANIFEST_FILE: &str = "blueprint.toml";

/// Directory holding the project files inside each blueprint directory.
pub const FILES_DIR: &str = "files";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `blueprint.toml` file.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct BlueprintManifest {
    pub blueprint: BlueprintSection,
    #[serde(default)]
    pub entries: Vec<EntrySection>,
    #[serde(default)]
    pub renames: BTreeMap<String, String>,
}

/// `[blueprint]` section.
#[derive(Debug, Deserialize, Clone)]
pub struct BlueprintSection {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub install: Option<Vec<String>>,
}

/// One `[[entries]]` item.
#[derive(Debug, Deserialize, Clone)]
pub struct EntrySection {
    pub path: String,
    #[serde(default)]
    pub category: FileCategory,
    pub destination: Option<String>,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`Blueprint`]s from subdirectories of `root`.
///
/// Subdirectories that are missing `blueprint.toml`, or whose manifest is
/// invalid, emit a `WARN` log and are skipped.
pub struct FilesystemBlueprintLoader {
    root: PathBuf,
}

impl FilesystemBlueprintLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every valid blueprint found under the root.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidBlueprint`] if the root is missing or unreadable.
    #[instrument(skip(self), fields(dir = %self.root.display()))]
    pub fn load_all(&self) -> Result<Vec<Blueprint>, DomainError> {
        if !self.root.is_dir() {
            return Err(DomainError::InvalidBlueprint(format!(
                "blueprints directory not found: {}",
                self.root.display()
            )));
        }

        let read_dir = fs::read_dir(&self.root).map_err(|e| {
            DomainError::InvalidBlueprint(format!(
                "failed to read blueprints directory '{}': {e}",
                self.root.display()
            ))
        })?;

        let mut dirs: Vec<PathBuf> = read_dir
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();

        let mut blueprints = Vec::new();
        for dir in dirs {
            match load_blueprint_dir(&dir) {
                Ok(bp) => {
                    debug!(name = %bp.name(), entries = bp.entries.len(), "loaded blueprint");
                    blueprints.push(bp);
                }
                Err(e) => {
                    warn!(
                        dir   = %dir.display(),
                        error = %e,
                        "skipping blueprint directory due to load error"
                    );
                }
            }
        }

        debug!(count = blueprints.len(), "finished loading blueprints");
        Ok(blueprints)
    }
}

/// Load a single blueprint from `dir`.
///
/// # Errors
///
/// Missing or malformed `blueprint.toml`, missing `files/`, an `[[entries]]`
/// path with no file on disk, or anything `Blueprint::validate` rejects.
#[instrument(fields(dir = %dir.display()))]
pub fn load_blueprint_dir(dir: &Path) -> Result<Blueprint, DomainError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let raw = fs::read_to_string(&manifest_path).map_err(|e| {
        DomainError::InvalidBlueprint(format!(
            "failed to read '{}': {e}",
            manifest_path.display()
        ))
    })?;

    let manifest: BlueprintManifest = toml::from_str(&raw).map_err(|e| {
        DomainError::InvalidBlueprint(format!(
            "failed to parse '{}': {e}",
            manifest_path.display()
        ))
    })?;

    let files_dir = dir.join(FILES_DIR);
    if !files_dir.is_dir() {
        return Err(DomainError::InvalidBlueprint(format!(
            "missing {FILES_DIR}/ in '{}'",
            dir.display()
        )));
    }

    build_blueprint(manifest, &files_dir)
}

fn build_blueprint(manifest: BlueprintManifest, files_dir: &Path) -> Result<Blueprint, DomainError> {
    let mut declared: HashMap<String, &EntrySection> = manifest
        .entries
        .iter()
        .map(|e| (normalize_path(&e.path), e))
        .collect();

    let mut builder = Blueprint::builder().metadata(metadata_from(&manifest.blueprint));

    for walk_entry in WalkDir::new(files_dir).min_depth(1).sort_by_file_name() {
        let walk_entry = walk_entry
            .map_err(|e| DomainError::InvalidBlueprint(format!("directory walk error: {e}")))?;

        if !walk_entry.file_type().is_file() {
            continue;
        }

        let abs_path = walk_entry.path();
        let rel = abs_path.strip_prefix(files_dir).map_err(|_| {
            DomainError::InvalidBlueprint(format!(
                "failed to relativise '{}' against '{}'",
                abs_path.display(),
                files_dir.display()
            ))
        })?;
        let path_str = normalize_path(&rel.to_string_lossy());

        let bytes = fs::read(abs_path).map_err(|e| {
            DomainError::InvalidBlueprint(format!("failed to read file '{path_str}': {e}"))
        })?;
        let content = TemplateSource::from(bytes);
        if content.is_binary() {
            debug!(path = %path_str, "binary file, copied verbatim");
        }

        let source = RelativePath::try_new(&path_str)?;
        let entry = match declared.remove(&path_str) {
            Some(section) => {
                let entry = BlueprintEntry::new(source, section.category, content);
                match &section.destination {
                    Some(dest) => entry.with_destination(dest.clone()),
                    None => entry,
                }
            }
            None => BlueprintEntry::new(source, FileCategory::Core, content),
        };

        builder = builder.entry(entry);
    }

    if let Some(missing) = declared.keys().next() {
        return Err(DomainError::InvalidBlueprint(format!(
            "entry '{missing}' has no file under {FILES_DIR}/"
        )));
    }

    for (from, to) in &manifest.renames {
        RelativePath::try_new(normalize_path(from))?;
        builder = builder.rename(&normalize_path(from), to.clone());
    }

    builder.build()
}

fn metadata_from(section: &BlueprintSection) -> BlueprintMetadata {
    let mut metadata = BlueprintMetadata::new(section.name.trim())
        .description(section.description.clone().unwrap_or_default());

    if let Some(version) = &section.version {
        metadata = metadata.version(version.clone());
    }
    if let Some(install) = &section.install {
        if !install.is_empty() {
            metadata = metadata.install_command(install.clone());
        }
    }

    metadata
}

/// Normalise a filesystem path to forward slashes so Windows and Unix paths
/// compare identically throughout the loader.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Write a blueprint directory `name` under `root`.
    fn write_blueprint(root: &Path, name: &str, manifest: &str, files: &[(&str, &str)]) {
        let dir = root.join(name);
        fs::create_dir_all(dir.join(FILES_DIR)).unwrap();
        fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
        for (rel, content) in files {
            let full = dir.join(FILES_DIR).join(rel);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
    }

    const WEB_MANIFEST: &str = r#"
[blueprint]
name        = "web"
version     = "2.0.0"
description = "Web app"
install     = ["npm", "install"]

[[entries]]
path     = "src/app.html"
category = "template-body"

[[entries]]
path        = "src/app.spec.ts"
category    = "spec"
destination = "test/__name__.spec.ts"

[renames]
"gitignore" = ".gitignore"
"#;

    fn web_files() -> Vec<(&'static str, &'static str)> {
        vec![
            ("gitignore", "node_modules\n"),
            ("src/app.html", "<h1>{{PROJECT_NAME}}</h1>"),
            ("src/app.spec.ts", "it('works')"),
            ("src/main.ts", "console.log('{{PACKAGE_NAME}}')"),
        ]
    }

    #[test]
    fn missing_root_is_an_error() {
        let loader = FilesystemBlueprintLoader::new("/absolutely/does/not/exist");
        assert!(matches!(
            loader.load_all(),
            Err(DomainError::InvalidBlueprint(_))
        ));
    }

    #[test]
    fn loads_metadata_and_categories() {
        let root = TempDir::new().unwrap();
        write_blueprint(root.path(), "web", WEB_MANIFEST, &web_files());

        let bps = FilesystemBlueprintLoader::new(root.path()).load_all().unwrap();
        assert_eq!(bps.len(), 1);

        let bp = &bps[0];
        assert_eq!(bp.name(), "web");
        assert_eq!(bp.metadata.version, "2.0.0");
        assert_eq!(
            bp.metadata.install_command,
            Some(vec!["npm".to_string(), "install".to_string()])
        );

        let categories: Vec<_> = bp
            .entries
            .iter()
            .map(|e| (e.source.as_str().to_string(), e.category))
            .collect();
        assert_eq!(
            categories,
            vec![
                ("gitignore".to_string(), FileCategory::Core),
                ("src/app.html".to_string(), FileCategory::TemplateBody),
                ("src/app.spec.ts".to_string(), FileCategory::Spec),
                ("src/main.ts".to_string(), FileCategory::Core),
            ]
        );
    }

    #[test]
    fn applies_renames_and_destinations() {
        let root = TempDir::new().unwrap();
        write_blueprint(root.path(), "web", WEB_MANIFEST, &web_files());
        let bp = load_blueprint_dir(&root.path().join("web")).unwrap();

        let gitignore = &bp.entries[0];
        let spec = &bp.entries[2];
        assert_eq!(bp.destination_for(gitignore), ".gitignore");
        assert_eq!(bp.destination_for(spec), "test/__name__.spec.ts");
    }

    #[test]
    fn skips_invalid_directories() {
        let root = TempDir::new().unwrap();
        write_blueprint(root.path(), "good", WEB_MANIFEST, &web_files());
        fs::create_dir(root.path().join("no-manifest")).unwrap();
        write_blueprint(root.path(), "broken", "not = [valid", &[("a", "")]);
        fs::write(root.path().join("README.md"), "top-level file").unwrap();

        let bps = FilesystemBlueprintLoader::new(root.path()).load_all().unwrap();
        assert_eq!(bps.len(), 1);
        assert_eq!(bps[0].name(), "web");
    }

    #[test]
    fn declared_entry_without_file_is_rejected() {
        let root = TempDir::new().unwrap();
        write_blueprint(root.path(), "web", WEB_MANIFEST, &[("gitignore", "")]);
        let err = load_blueprint_dir(&root.path().join("web")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidBlueprint(_)));
    }

    #[test]
    fn empty_files_dir_is_rejected() {
        let root = TempDir::new().unwrap();
        write_blueprint(root.path(), "empty", "[blueprint]\nname = \"empty\"\n", &[]);
        let err = load_blueprint_dir(&root.path().join("empty")).unwrap_err();
        assert!(matches!(err, DomainError::EmptyBlueprint { .. }));
    }

    #[test]
    fn unknown_category_fails_to_parse() {
        let root = TempDir::new().unwrap();
        let manifest = "[blueprint]\nname = \"x\"\n[[entries]]\npath = \"a\"\ncategory = \"binary\"\n";
        write_blueprint(root.path(), "x", manifest, &[("a", "")]);
        assert!(load_blueprint_dir(&root.path().join("x")).is_err());
    }

    #[test]
    fn binary_files_load_as_verbatim_entries() {
        let root = TempDir::new().unwrap();
        write_blueprint(
            root.path(),
            "assets",
            "[blueprint]\nname = \"assets\"\n",
            &[("README.md", "# {{PROJECT_NAME}}\n")],
        );
        let icon: [u8; 7] = [0x00, 0x00, 0x01, 0x00, 0xff, 0xfe, 0x80];
        let icon_path = root.path().join("assets").join(FILES_DIR).join("src/favicon.ico");
        fs::create_dir_all(icon_path.parent().unwrap()).unwrap();
        fs::write(&icon_path, icon).unwrap();

        let bp = load_blueprint_dir(&root.path().join("assets")).unwrap();

        let entry = bp
            .entries
            .iter()
            .find(|e| e.source.as_str() == "src/favicon.ico")
            .unwrap();
        assert!(entry.content.is_binary());
        assert_eq!(entry.content.as_bytes(), icon);
        assert_eq!(bp.entries.len(), 2);
    }
}
