//! A save interrupted between backing up and writing the new document.

use std::fs;

use apkshelf::application::UploadRequest;
use apkshelf::ErrorKind;

use crate::common::{fake_apk, TestShelf};

fn seed(env: &TestShelf) -> String {
    env.open()
        .upload_use_case()
        .execute(
            &UploadRequest::new("Demo", "beta"),
            &fake_apk("Example", "com.example.app", "1.0", false),
        )
        .unwrap()
        .build
        .file_name
}

#[test]
fn missing_primary_is_restored_from_backup() {
    let env = TestShelf::new();
    let file_name = seed(&env);

    fs::rename(env.metadata_path(), env.backup_path()).unwrap();

    let shelf = env.open();
    let app = shelf.store.find_app("com.example.app").unwrap();
    assert_eq!(app.builds[0].file_name, file_name);
    assert!(env.metadata_path().is_file());
    assert!(!env.backup_path().exists());
}

#[test]
fn truncated_primary_is_replaced_by_backup() {
    let env = TestShelf::new();
    let file_name = seed(&env);

    fs::copy(env.metadata_path(), env.backup_path()).unwrap();
    fs::write(env.metadata_path(), b"[{\"projectName\": \"De").unwrap();

    let shelf = env.open();
    assert!(shelf.store.contains_file(&file_name));

    // The next save works off the recovered state.
    shelf
        .upload_use_case()
        .execute(
            &UploadRequest::new("Demo", "beta"),
            &fake_apk("Example", "com.example.app", "1.1", false),
        )
        .unwrap();
    assert_eq!(
        env.open().store.find_app("com.example.app").unwrap().builds.len(),
        2
    );
}

#[test]
fn corrupted_primary_without_backup_refuses_to_start() {
    let env = TestShelf::new();
    fs::write(env.metadata_path(), b"{ not json").unwrap();

    let err = apkshelf::Shelf::open(&env.config).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(err.to_string().contains("metadata file corrupted"));

    // The broken file is left for the operator.
    assert_eq!(fs::read(env.metadata_path()).unwrap(), b"{ not json");
}
