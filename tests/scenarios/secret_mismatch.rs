//! Deletions with a wrong or missing secret never touch the registry.

use std::fs;

use apkshelf::application::{DeleteAuth, DeleteError, UploadRequest};
use apkshelf::domain::value_objects::DeleteSecret;

use crate::common::{fake_apk, TestShelf, SECRET};

#[test]
fn wrong_secret_changes_nothing_on_disk() {
    let env = TestShelf::new();
    let shelf = env.open();
    let uploaded = shelf
        .upload_use_case()
        .execute(
            &UploadRequest::new("Demo", "beta"),
            &fake_apk("Example", "com.example.app", "1.0", true),
        )
        .unwrap();
    let metadata_before = fs::read(env.metadata_path()).unwrap();

    let delete = shelf.delete_use_case(DeleteAuth::SharedSecret(DeleteSecret::new(SECRET)));
    for presented in [None, Some(""), Some("wrong"), Some("correct horse ")] {
        assert_eq!(
            delete.delete_build(presented, "com.example.app", &uploaded.build.file_name),
            Err(DeleteError::Unauthorized)
        );
        assert_eq!(
            delete.delete_app(presented, "com.example.app"),
            Err(DeleteError::Unauthorized)
        );
    }

    assert_eq!(fs::read(env.metadata_path()).unwrap(), metadata_before);
    assert!(env.upload_path(&uploaded.build.file_name).is_file());
    assert!(env.icon_path("com.example.app").is_file());
    assert!(env.open().store.find_app("com.example.app").is_some());
}

#[test]
fn right_secret_removes_the_app() {
    let env = TestShelf::new();
    let shelf = env.open();
    let uploaded = shelf
        .upload_use_case()
        .execute(
            &UploadRequest::new("Demo", "beta"),
            &fake_apk("Example", "com.example.app", "1.0", true),
        )
        .unwrap();

    let removed = shelf
        .remote_delete_use_case(&env.config)
        .delete_app(Some(SECRET), "com.example.app")
        .unwrap();
    assert_eq!(removed.removed_builds.len(), 1);
    assert!(removed.project_removed);
    assert!(!env.upload_path(&uploaded.build.file_name).exists());
    assert!(!env.icon_path("com.example.app").exists());
}
