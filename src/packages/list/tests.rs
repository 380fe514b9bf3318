use super::*;
use crate::utils::fs::OsFileSystem;
use std::fs;

#[test]
fn direct_names_then_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    fs::write(&first, "git\ncurl\n").unwrap();
    fs::write(&second, "curl\nmake").unwrap();

    let list = PackageList::from_packages(["ca-certificates", "git"])
        .with_package_list_files([&first, &second]);

    assert_eq!(
        list.packages(&OsFileSystem).unwrap(),
        vec!["ca-certificates", "git", "git", "curl", "curl", "make"]
    );
}

#[test]
fn lines_are_not_trimmed_or_filtered() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("list.txt");
    fs::write(&file, "  padded \n\n# comment\r\nlast\n").unwrap();

    let list = PackageList::default().with_package_list_files([&file]);

    assert_eq!(
        list.packages_from_list_files(&OsFileSystem).unwrap(),
        vec!["  padded ", "", "# comment", "last"]
    );
}

#[test]
fn local_packages_are_never_resolved_as_names() {
    let list = PackageList::from_packages(["vim"]).with_local_packages(["/tmp/quarto.deb"]);

    assert_eq!(list.packages(&OsFileSystem).unwrap(), vec!["vim"]);
    assert!(!list.is_empty());
}

#[test]
fn missing_list_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let list = PackageList::from_packages(["vim"]).with_package_list_files([&missing]);

    let err = list.packages(&OsFileSystem).unwrap_err();
    match err {
        HostkitError::PackageListFile { path, source } => {
            assert_eq!(path, missing);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_list() {
    let list = PackageList::default();
    assert!(list.is_empty());
    assert!(list.packages(&OsFileSystem).unwrap().is_empty());
}
