//! Target directory and package identity resolution.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::domain::{naming::ProjectIdentity, value_objects::GenerationOptions};

/// Where a run writes and what it calls the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDirectory {
    pub target_directory: PathBuf,
    pub package_identity: String,
    cwd: PathBuf,
}

impl ResolvedDirectory {
    /// Directory the run ends in: the target for a real run, the starting
    /// directory for a dry run.
    pub fn working_directory(&self, dry_run: bool) -> &Path {
        if dry_run {
            &self.cwd
        } else {
            &self.target_directory
        }
    }
}

/// Pure mapping from identity and options to a target path. Never touches the
/// filesystem.
pub struct DirectoryResolver;

impl DirectoryResolver {
    /// Resolve the target directory.
    ///
    /// - `options.directory = D`: target is `cwd/D`. The directory name no
    ///   longer follows the project name, the package identity still does.
    /// - otherwise: target is `cwd/<dasherized name>`.
    ///
    /// An absolute `D` replaces `cwd` entirely. `.` and `..` are folded
    /// lexically so the target's ancestry can be walked.
    pub fn resolve(
        identity: &ProjectIdentity,
        options: &GenerationOptions,
        cwd: &Path,
    ) -> ResolvedDirectory {
        let package_identity = identity.dasherized_name().to_string();

        let target_directory = normalize(&match options.directory() {
            Some(dir) => cwd.join(dir),
            None => cwd.join(&package_identity),
        });

        ResolvedDirectory {
            target_directory,
            package_identity,
            cwd: cwd.to_path_buf(),
        }
    }
}

/// Fold `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::naming::NameValidator;

    fn id(name: &str) -> ProjectIdentity {
        NameValidator::validate(name).unwrap()
    }

    #[test]
    fn defaults_to_dasherized_name_under_cwd() {
        let resolved = DirectoryResolver::resolve(
            &id("foo"),
            &GenerationOptions::new(),
            Path::new("/work"),
        );
        assert_eq!(resolved.target_directory, PathBuf::from("/work/foo"));
        assert_eq!(resolved.package_identity, "foo");
    }

    #[test]
    fn camel_case_name_is_dasherized_for_directory() {
        let resolved = DirectoryResolver::resolve(
            &id("FooApp"),
            &GenerationOptions::new(),
            Path::new("/work"),
        );
        assert_eq!(resolved.target_directory, PathBuf::from("/work/foo-app"));
        assert_eq!(resolved.package_identity, "foo-app");
    }

    #[test]
    fn explicit_directory_decouples_path_from_name() {
        let resolved = DirectoryResolver::resolve(
            &id("foo"),
            &GenerationOptions::new().with_directory("bar"),
            Path::new("/work"),
        );
        assert_eq!(resolved.target_directory, PathBuf::from("/work/bar"));
        assert_eq!(resolved.package_identity, "foo");
    }

    #[test]
    fn working_directory_depends_on_dry_run() {
        let resolved = DirectoryResolver::resolve(
            &id("foo"),
            &GenerationOptions::new(),
            Path::new("/work"),
        );
        assert_eq!(resolved.working_directory(false), Path::new("/work/foo"));
        assert_eq!(resolved.working_directory(true), Path::new("/work"));
    }

    #[test]
    fn parent_segments_are_folded() {
        let resolved = DirectoryResolver::resolve(
            &id("foo"),
            &GenerationOptions::new().with_directory("../proj/./sub"),
            Path::new("/work/here"),
        );
        assert_eq!(resolved.target_directory, PathBuf::from("/work/proj/sub"));
    }

    #[test]
    fn absolute_directory_replaces_cwd() {
        let resolved = DirectoryResolver::resolve(
            &id("foo"),
            &GenerationOptions::new().with_directory("/srv/app"),
            Path::new("/work"),
        );
        assert_eq!(resolved.target_directory, PathBuf::from("/srv/app"));
    }
}
