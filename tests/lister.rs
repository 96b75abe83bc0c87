use std::ffi::OsString;
use std::fs;
use tempfile::tempdir;

use clean_import::{EventRecord, RecordingReporter, list_files, try_list_files};

fn sorted(mut v: Vec<OsString>) -> Vec<OsString> {
    v.sort();
    v
}

#[test]
fn lists_files_and_ignores_subdirectories() {
    let td = tempdir().unwrap();
    let source = td.path().join("input");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("document.txt"), "Text content").unwrap();
    fs::write(source.join("image.jpg"), "Image data placeholder").unwrap();
    fs::create_dir(source.join("a_folder")).unwrap();
    fs::write(source.join("a_folder").join("nested_file.dat"), "nested data").unwrap();

    let rec = RecordingReporter::new();
    let names = sorted(list_files(&source, &rec));

    assert_eq!(names, vec![OsString::from("document.txt"), OsString::from("image.jpg")]);
    assert!(!rec.has_directory_error(), "no read error expected for a valid directory");
}

#[test]
fn missing_directory_yields_empty_and_reports() {
    let td = tempdir().unwrap();
    let missing = td.path().join("does_not_exist");

    let rec = RecordingReporter::new();
    let names = list_files(&missing, &rec);

    assert!(names.is_empty());
    assert_eq!(
        rec.events(),
        vec![EventRecord::DirectoryReadFailed {
            dir: missing.clone(),
            kind: "directory_read"
        }]
    );
    assert!(try_list_files(&missing).is_err());
}

#[test]
fn file_path_is_not_a_directory() {
    let td = tempdir().unwrap();
    let file = td.path().join("plain.txt");
    fs::write(&file, "x").unwrap();

    let rec = RecordingReporter::new();
    assert!(list_files(&file, &rec).is_empty());
    assert!(rec.has_directory_error());
}

#[test]
fn empty_directory_lists_nothing_without_error() {
    let td = tempdir().unwrap();
    let rec = RecordingReporter::new();
    assert!(list_files(td.path(), &rec).is_empty());
    assert!(rec.events().is_empty());
}

#[cfg(unix)]
#[test]
fn symlinks_follow_their_target() {
    use std::os::unix::fs::symlink;

    let td = tempdir().unwrap();
    let source = td.path().join("input");
    fs::create_dir(&source).unwrap();
    let real = td.path().join("real.txt");
    fs::write(&real, "r").unwrap();
    symlink(&real, source.join("to_file")).unwrap();
    symlink(td.path(), source.join("to_dir")).unwrap();
    symlink(td.path().join("gone"), source.join("dangling")).unwrap();

    let names = try_list_files(&source).unwrap();
    assert_eq!(names, vec![OsString::from("to_file")]);
}
