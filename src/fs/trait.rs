//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// True when the entry is a regular file whose name ends with `.{ext}`
    pub fn has_extension(&self, ext: &str) -> bool {
        self.file_type == FileType::File
            && Path::new(&self.name)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == ext)
    }
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// List directory contents
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Create a directory and all missing parents
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Write a file, creating parent directories as needed
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;

    /// Copy a file, creating parent directories of `to` as needed
    fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;

    /// Recursively list every regular file below `root`.
    ///
    /// Returns an empty list when `root` is not a directory.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        if !self.is_dir(root) {
            return Ok(files);
        }

        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in self.read_dir(&dir)? {
                match entry.file_type {
                    FileType::Directory => pending.push(entry.path),
                    FileType::File => files.push(entry.path),
                    FileType::Symlink => {}
                }
            }
        }

        files.sort();
        Ok(files)
    }
}
