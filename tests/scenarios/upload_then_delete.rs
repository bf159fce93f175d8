//! Upload two builds of one app, then delete them one at a time.

use apkshelf::application::{DeleteAuth, UploadRequest};
use apkshelf::domain::value_objects::DeleteSecret;

use crate::common::{fake_apk, TestShelf, SECRET};

#[test]
fn newest_build_first_then_cascading_delete() {
    let env = TestShelf::new();
    let shelf = env.open();
    let upload = shelf.upload_use_case();

    let first = upload
        .execute(
            &UploadRequest::new("Demo", "beta"),
            &fake_apk("Example", "com.example.app", "1.0", true),
        )
        .unwrap();
    let second = upload
        .execute(
            &UploadRequest::new("Demo", "beta").with_release_notes("fixes"),
            &fake_apk("Example", "com.example.app", "1.1", false),
        )
        .unwrap();

    // Reopen: everything below comes from the metadata file.
    let shelf = env.open();
    let projects = shelf.store.snapshot();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].project_name, "Demo");
    assert_eq!(projects[0].apps.len(), 1);

    let app = &projects[0].apps[0];
    assert_eq!(app.package_name, "com.example.app");
    let versions: Vec<_> = app.builds.iter().map(|b| b.version.as_str()).collect();
    assert_eq!(versions, ["1.1", "1.0"]);
    assert_eq!(app.builds[0].release_notes, "fixes");
    assert!(app.icon_path.is_some(), "icon from the first upload is kept");

    assert!(env.upload_path(&first.build.file_name).is_file());
    assert!(env.upload_path(&second.build.file_name).is_file());
    assert!(env.icon_path("com.example.app").is_file());
    assert_eq!(env.staged_files(), 0);

    let delete = shelf.delete_use_case(DeleteAuth::SharedSecret(DeleteSecret::new(SECRET)));

    let removed = delete
        .delete_build(Some(SECRET), "com.example.app", &first.build.file_name)
        .unwrap();
    assert!(!removed.app_removed);
    assert!(!env.upload_path(&first.build.file_name).exists());

    let shelf = env.open();
    let app = shelf.store.find_app("com.example.app").unwrap();
    let files: Vec<_> = app.builds.iter().map(|b| b.file_name.clone()).collect();
    assert_eq!(files, [second.build.file_name.clone()]);

    let delete = shelf.delete_use_case(DeleteAuth::SharedSecret(DeleteSecret::new(SECRET)));
    let removed = delete
        .delete_build(Some(SECRET), "com.example.app", &second.build.file_name)
        .unwrap();
    assert!(removed.app_removed);
    assert!(removed.project_removed);
    assert!(!env.icon_path("com.example.app").exists());

    assert!(env.open().store.snapshot().is_empty());
}

#[test]
fn apps_keep_their_first_project() {
    let env = TestShelf::new();
    let upload = env.open().upload_use_case();

    upload
        .execute(
            &UploadRequest::new("Alpha", "beta"),
            &fake_apk("One", "com.example.one", "1.0", false),
        )
        .unwrap();
    upload
        .execute(
            &UploadRequest::new("Beta", "beta"),
            &fake_apk("Two", "com.example.two", "1.0", false),
        )
        .unwrap();
    upload
        .execute(
            &UploadRequest::new("Beta", "release"),
            &fake_apk("One Renamed", "com.example.one", "2.0", false),
        )
        .unwrap();

    let projects = env.open().store.snapshot();
    let names: Vec<_> = projects.iter().map(|p| p.project_name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta"]);
    assert_eq!(projects[0].apps[0].package_name, "com.example.one");
    assert_eq!(projects[0].apps[0].app_name, "One Renamed");
    assert_eq!(projects[0].apps[0].builds.len(), 2);
    assert_eq!(projects[1].apps.len(), 1);
}

#[test]
fn rejected_upload_leaves_nothing_behind() {
    let env = TestShelf::new();
    let upload = env.open().upload_use_case();

    let err = upload
        .execute(&UploadRequest::new("Demo", "beta"), b"not an apk")
        .unwrap_err();
    assert!(err.is_client_error());

    assert_eq!(env.staged_files(), 0);
    assert!(!env.metadata_path().exists());
    assert!(env.open().store.snapshot().is_empty());
}
