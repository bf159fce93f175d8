//! CLI behaviour against a metadata file on disk.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn write_config(dir: &Path) -> std::path::PathBuf {
    let config = dir.join("apkshelf.toml");
    fs::write(
        &config,
        format!(
            r#"[storage]
metadata_path = "{root}/metadata.json"
uploads_dir = "{root}/uploads"
icons_dir = "{root}/icons"
"#,
            root = dir.display().to_string().replace('\\', "/")
        ),
    )
    .unwrap();
    config
}

fn apkshelf(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_apkshelf"));
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("APKSHELF_METADATA_PATH");
    cmd
}

#[test]
fn list_on_empty_registry() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());

    let output = apkshelf(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("list")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "No builds uploaded yet.\n");
}

#[test]
fn list_json_reads_existing_metadata() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    fs::write(
        dir.path().join("metadata.json"),
        r#"[{"projectName":"Demo","apps":[{"appName":"Example","packageName":"com.example.app","iconPath":"","builds":[{"version":"1.0","channel":"beta","releaseNotes":"","fileName":"app-1.0-beta-100.apk","fileSize":2048,"uploadTime":"2024-05-01 10:00:00","downloadURL":"/downloads/app-1.0-beta-100.apk"}]}]}]"#,
    )
    .unwrap();

    let output = apkshelf(dir.path())
        .args(["--config", config.to_str().unwrap(), "list", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["apps"][0]["builds"][0]["fileSizeHuman"], "2.00 KB");
    assert!(json[0]["apps"][0].get("iconURL").is_none());
}

#[test]
fn corrupted_metadata_is_reported() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    fs::write(dir.path().join("metadata.json"), "[{ not json").unwrap();

    let output = apkshelf(dir.path())
        .args(["--config", config.to_str().unwrap(), "list"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("metadata file corrupted"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn delete_app_unknown_package_fails() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());

    let output = apkshelf(dir.path())
        .args([
            "--config",
            config.to_str().unwrap(),
            "delete-app",
            "com.missing",
            "--yes",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("app not found: com.missing"));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = tempdir().unwrap();

    let output = apkshelf(dir.path())
        .args(["--config", "nope.toml", "list"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.toml"));
}
