//! Scaffold Service - main application orchestrator.
//!
//! Drives one generation run through its stages:
//! 1. Validate the raw name
//! 2. Resolve target directory and package identity
//! 3. Check the ancestry for an existing project
//! 4. Resolve the blueprint
//! 5. Materialize entries (or record them under dry-run)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError, TargetConflict,
        ports::{BlueprintStore, Filesystem, ManifestWriter, TemplateRenderer},
        services::{BlueprintResolver, NestedProjectGuard},
    },
    domain::{
        Blueprint, DirectoryResolver, DomainValidator, FileToWrite, GenerationOptions,
        GenerationResult, GenerationStage, ProjectIdentity, ProjectStructure, RenderContext,
    },
    error::TrellisResult,
};

/// Input of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub raw_name: String,
    pub blueprint_name: String,
    pub options: GenerationOptions,
    pub cwd: PathBuf,
}

impl GenerationRequest {
    pub fn new(
        raw_name: impl Into<String>,
        blueprint_name: impl Into<String>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            raw_name: raw_name.into(),
            blueprint_name: blueprint_name.into(),
            options: GenerationOptions::default(),
            cwd: cwd.into(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    resolver: BlueprintResolver,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    manifest: Option<Box<dyn ManifestWriter>>,
    guard: NestedProjectGuard,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use trellis_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Arc::new(store), // impl BlueprintStore
    ///     Box::new(renderer),
    ///     Box::new(filesystem),
    /// );
    /// ```
    pub fn new(
        store: Arc<dyn BlueprintStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            resolver: BlueprintResolver::new(store),
            renderer,
            filesystem,
            manifest: None,
            guard: NestedProjectGuard::default(),
        }
    }

    /// Emit a package manifest alongside the blueprint entries.
    pub fn with_manifest_writer(mut self, writer: Box<dyn ManifestWriter>) -> Self {
        self.manifest = Some(writer);
        self
    }

    /// Use a different project marker for the nested-project guard.
    pub fn with_guard(mut self, guard: NestedProjectGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn resolver(&self) -> &BlueprintResolver {
        &self.resolver
    }

    /// Run the full generation state machine.
    ///
    /// # Errors
    ///
    /// - `InvalidName` if the raw name fails validation
    /// - `NestedProject` if a project marker sits in the ancestry of `cwd` or
    ///   of the target's parent
    /// - `UnknownBlueprint` if the blueprint is not registered
    /// - `TargetExists` if the target cannot be used
    /// - `FilesystemWrite` on the first failed write (no rollback)
    #[instrument(
        skip_all,
        fields(
            run_id = tracing::field::Empty,
            name = %request.raw_name,
            blueprint = %request.blueprint_name,
            dry_run = request.options.dry_run(),
        )
    )]
    pub fn generate(&self, request: GenerationRequest) -> TrellisResult<GenerationResult> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));

        let mut stage = GenerationStage::Validating;
        let outcome = self.run(run_id, &request, &mut stage);

        if let Err(e) = &outcome {
            let failed = GenerationStage::Failed(e.code().to_string());
            debug!(from = %stage, to = %failed, "Stage transition");
        }

        outcome
    }

    fn run(
        &self,
        run_id: Uuid,
        request: &GenerationRequest,
        stage: &mut GenerationStage,
    ) -> TrellisResult<GenerationResult> {
        let options = &request.options;
        debug!(stage = %stage, "Generation started");

        let identity = DomainValidator::validate_name(&request.raw_name)?;
        advance(stage, GenerationStage::DirectoryResolved);

        let resolved = DirectoryResolver::resolve(&identity, options, &request.cwd);
        debug!(
            dir = %resolved.target_directory.display(),
            package = %resolved.package_identity,
            "Directory resolved"
        );

        self.guard.check(self.filesystem.as_ref(), &request.cwd)?;
        // The target itself is covered by `check_target`.
        if let Some(parent) = resolved.target_directory.parent() {
            self.guard.check(self.filesystem.as_ref(), parent)?;
        }
        advance(stage, GenerationStage::GuardChecked);

        let blueprint = self.resolver.resolve(&request.blueprint_name)?;
        advance(stage, GenerationStage::BlueprintResolved);

        self.check_target(&resolved.target_directory, options)?;

        advance(stage, GenerationStage::Materializing);
        let materialized =
            self.materialize(&identity, options, &blueprint, &resolved.target_directory)?;

        advance(stage, GenerationStage::Done);
        info!(
            files = materialized.len(),
            dir = %resolved.target_directory.display(),
            "Generation completed"
        );

        Ok(GenerationResult {
            run_id,
            blueprint: blueprint.metadata.name.clone(),
            working_directory: resolved.working_directory(options.dry_run()).to_path_buf(),
            target_directory: resolved.target_directory,
            identity,
            package_identity: resolved.package_identity,
            materialized_files: materialized,
            dry_run: options.dry_run(),
            stage: stage.clone(),
            install_command: blueprint.metadata.install_command.clone(),
        })
    }

    /// Materialize `blueprint` into `target`.
    ///
    /// Per entry, in manifest order: drop excluded categories, apply the rename
    /// table, substitute tokens in path and content, then write (or only record
    /// under dry-run). Returns the absolute paths in write order.
    #[instrument(skip_all, fields(blueprint = %blueprint.name(), target = %target.display()))]
    pub fn materialize(
        &self,
        identity: &ProjectIdentity,
        options: &GenerationOptions,
        blueprint: &Blueprint,
        target: &Path,
    ) -> TrellisResult<Vec<PathBuf>> {
        let structure = self.plan(identity, options, blueprint, target)?;
        DomainValidator::validate_project_structure(&structure)?;

        let mut written = Vec::with_capacity(structure.file_count());

        if !options.dry_run() {
            self.create_dir(target)?;
        }

        for file in structure.files() {
            let path = structure.absolute_path(file);

            if options.dry_run() {
                debug!(path = %path.display(), "Would write");
            } else {
                if let Some(parent) = path.parent() {
                    self.create_dir(parent)?;
                }
                self.filesystem
                    .write_file(&path, &file.content)
                    .map_err(|e| write_error(&path, e))?;
                debug!(path = %path.display(), bytes = file.size(), "Wrote file");
            }

            written.push(path);
        }

        Ok(written)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Build the rendered file plan without touching the filesystem.
    fn plan(
        &self,
        identity: &ProjectIdentity,
        options: &GenerationOptions,
        blueprint: &Blueprint,
        target: &Path,
    ) -> TrellisResult<ProjectStructure> {
        let context = RenderContext::new(identity);
        let mut structure = ProjectStructure::new(target);

        for entry in &blueprint.entries {
            if entry.category.is_excluded_by(options) {
                debug!(source = %entry.source, category = %entry.category, "Excluded");
                continue;
            }

            let destination = blueprint.destination_for(entry);
            let path = self.renderer.render_path(destination, &context)?;
            let content = match entry.content.as_text() {
                Some(text) => self.renderer.render_content(text, &context)?.into_bytes(),
                None => entry.content.as_bytes().to_vec(),
            };

            structure.add_file(FileToWrite::new(path, content).with_category(entry.category));
        }

        if let Some(writer) = &self.manifest {
            structure.add_file(writer.manifest(context.package_name())?);
        }

        Ok(structure)
    }

    /// Reject targets that already hold a project or, without `force`, any
    /// content. Runs under dry-run too.
    fn check_target(&self, target: &Path, options: &GenerationOptions) -> TrellisResult<()> {
        if !self.filesystem.exists(target) {
            return Ok(());
        }

        let conflict = if !self.filesystem.is_dir(target) {
            Some(TargetConflict::NotADirectory)
        } else if self.guard.is_project_root(self.filesystem.as_ref(), target) {
            Some(TargetConflict::ContainsMarker)
        } else if !options.force() && !self.filesystem.is_dir_empty(target)? {
            Some(TargetConflict::NotEmpty)
        } else {
            None
        };

        match conflict {
            Some(reason) => Err(ApplicationError::TargetExists {
                path: target.to_path_buf(),
                reason,
            }
            .into()),
            None => {
                if options.force() {
                    warn!(dir = %target.display(), "Generating into existing directory");
                }
                Ok(())
            }
        }
    }

    fn create_dir(&self, path: &Path) -> TrellisResult<()> {
        self.filesystem
            .create_dir_all(path)
            .map_err(|e| write_error(path, e))
    }
}

fn advance(stage: &mut GenerationStage, next: GenerationStage) {
    debug!(from = %stage, to = %next, "Stage transition");
    *stage = next;
}

/// Normalise adapter failures into `FilesystemWrite` for the failing path.
fn write_error(path: &Path, err: crate::error::TrellisError) -> crate::error::TrellisError {
    match err {
        crate::error::TrellisError::Application(ApplicationError::FilesystemWrite { .. }) => err,
        other => ApplicationError::FilesystemWrite {
            path: path.to_path_buf(),
            reason: other.to_string(),
        }
        .into(),
    }
}
