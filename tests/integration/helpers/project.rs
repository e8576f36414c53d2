use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A throwaway working directory for one run of the binary.
pub struct Project {
    pub root: TempDir,
}

pub fn tempdir() -> Project {
    Project {
        root: tempfile::Builder::new()
            .prefix("templify")
            .tempdir()
            .unwrap(),
    }
}

impl Project {
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn read(&self, path: &str) -> String {
        let path = self.path().join(path);
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("couldn't read file {path:?}"))
    }

    pub fn exists(&self, path: &str) -> bool {
        self.path().join(path).exists()
    }

    /// Sorted names of the immediate children of the directory.
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
