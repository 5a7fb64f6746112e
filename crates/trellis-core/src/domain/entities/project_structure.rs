use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::common::RelativePath, error::DomainError, value_objects::FileCategory,
};

/// Rendered file plan for one generation run.
///
/// Output of entry filtering, renaming and substitution. Holds no behaviour
/// beyond bookkeeping; the engine walks it to write (or simulate) files.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) files: Vec<FileToWrite>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, file: FileToWrite) {
        self.files.push(file);
    }

    pub fn with_file(mut self, file: FileToWrite) -> Self {
        self.add_file(file);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(&file.path) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.files.iter()
    }

    /// Absolute location of `file` under the root.
    pub fn absolute_path(&self, file: &FileToWrite) -> PathBuf {
        self.root.join(file.path.as_path())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: Vec<u8>,

    /// `None` for files not backed by a blueprint entry (package manifest).
    pub category: Option<FileCategory>,
}

impl FileToWrite {
    pub fn new(path: RelativePath, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path,
            content: content.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: FileCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Content as UTF-8, `None` for binary files.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_files_in_order() {
        let structure = ProjectStructure::new("/work/foo")
            .with_file(FileToWrite::new("a.txt".into(), "a"))
            .with_file(FileToWrite::new("src/b.txt".into(), "b"));

        let paths: Vec<_> = structure.files().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["a.txt", "src/b.txt"]);
        assert_eq!(structure.file_count(), 2);
        assert!(structure.validate().is_ok());
    }

    #[test]
    fn rejects_colliding_destinations() {
        let structure = ProjectStructure::new("/work/foo")
            .with_file(FileToWrite::new("a.txt".into(), "1"))
            .with_file(FileToWrite::new("a.txt".into(), "2"));

        assert!(matches!(
            structure.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn absolute_path_joins_root() {
        let structure = ProjectStructure::new("/work/foo");
        let file = FileToWrite::new("src/main.ts".into(), "");
        assert_eq!(
            structure.absolute_path(&file),
            PathBuf::from("/work/foo/src/main.ts")
        );
    }

    #[test]
    fn binary_files_have_no_text() {
        let file = FileToWrite::new("favicon.ico".into(), vec![0x00, 0xff]);
        assert_eq!(file.size(), 2);
        assert!(file.text().is_none());
        assert_eq!(FileToWrite::new("a.txt".into(), "a").text(), Some("a"));
    }
}
