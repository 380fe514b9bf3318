//! Filesystem capability handed to code that reads package lists,
//! verifies local archives or clears package-manager caches.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub trait FileSystem: Send + Sync {
    fn is_path_exist(&self, path: &Path) -> io::Result<bool>;
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead>>;
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn is_path_exist(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn reports_existence() {
        let dir = tempfile::tempdir().unwrap();
        let fs = OsFileSystem;

        assert!(fs.is_path_exist(dir.path()).unwrap());
        assert!(!fs.is_path_exist(&dir.path().join("missing")).unwrap());
    }

    #[test]
    fn open_reads_contents_and_fails_on_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("list.txt");
        std::fs::write(&file, "git\ncurl\n").unwrap();

        let mut content = String::new();
        OsFileSystem
            .open(&file)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "git\ncurl\n");

        let err = OsFileSystem.open(&dir.path().join("nope")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn remove_dir_all_removes_tree() {
        let dir = tempfile::tempdir().unwrap();
        let lists = dir.path().join("lists");
        std::fs::create_dir_all(lists.join("partial")).unwrap();
        std::fs::write(lists.join("Release"), "x").unwrap();

        OsFileSystem.remove_dir_all(&lists).unwrap();
        assert!(!lists.exists());
    }
}
