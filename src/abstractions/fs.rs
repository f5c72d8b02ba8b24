//! Filesystem access behind a trait so file-based prompts can be tested
//! without touching disk.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Result;

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// The real filesystem.
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }
}

/// In-memory path-to-contents mapping for tests.
#[derive(Default)]
pub struct InMemoryFileSystem {
    files: HashMap<String, String>,
}

impl InMemoryFileSystem {
    pub fn new(files: HashMap<String, String>) -> Self {
        Self { files }
    }
}

impl FileSystem for InMemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path.to_string_lossy().as_ref())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .get(path.to_string_lossy().as_ref())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No such file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_fs_reads_mapped_contents() {
        let mut files = HashMap::new();
        files.insert("/some/path".to_string(), "contents".to_string());
        let fs = InMemoryFileSystem::new(files);

        assert!(fs.exists(Path::new("/some/path")));
        assert_eq!(fs.read_to_string(Path::new("/some/path")).unwrap(), "contents");
    }

    #[test]
    fn test_in_memory_fs_missing_file() {
        let fs = InMemoryFileSystem::default();
        assert!(!fs.exists(Path::new("/some/notafile")));
        assert!(fs.read_to_string(Path::new("/some/notafile")).is_err());
    }

    #[test]
    fn test_os_fs_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        write!(file, "on disk").unwrap();

        let fs = OsFileSystem;
        assert!(fs.exists(file.path()));
        assert_eq!(fs.read_to_string(file.path()).unwrap(), "on disk");
    }
}
