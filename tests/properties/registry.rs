//! Properties of the project → app → build tree under arbitrary operations.

use std::collections::HashSet;

use apkshelf::domain::entities::{AppInfo, BuildInfo, Registry};
use chrono::NaiveDate;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Upsert { project: u8, package: u8 },
    RemoveBuild { package: u8, pick: usize },
    RemoveApp { package: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..3, 0u8..5).prop_map(|(project, package)| Op::Upsert { project, package }),
        2 => (0u8..5, any::<usize>()).prop_map(|(package, pick)| Op::RemoveBuild { package, pick }),
        1 => (0u8..5).prop_map(|package| Op::RemoveApp { package }),
    ]
}

fn package(n: u8) -> String {
    format!("com.example.app{}", n)
}

fn build(seq: usize) -> BuildInfo {
    BuildInfo {
        version: format!("1.{}", seq),
        channel: "beta".to_string(),
        release_notes: String::new(),
        file_name: format!("build_{}.apk", seq),
        file_size: seq as u64,
        upload_time: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + chrono::Duration::seconds(seq as i64),
    }
}

fn apply(registry: &mut Registry, ops: &[Op]) {
    for (seq, op) in ops.iter().enumerate() {
        match op {
            Op::Upsert { project, package: pkg } => registry.upsert_build(
                &format!("Project {}", project),
                AppInfo {
                    app_name: format!("App {}", pkg),
                    package_name: package(*pkg),
                    icon_path: None,
                },
                build(seq),
            ),
            Op::RemoveBuild { package: pkg, pick } => {
                let file = registry
                    .find_app(&package(*pkg))
                    .map(|app| app.builds[pick % app.builds.len()].file_name.clone());
                if let Some(file) = file {
                    registry.remove_build(&package(*pkg), &file).unwrap();
                }
            }
            Op::RemoveApp { package: pkg } => {
                let _ = registry.remove_app(&package(*pkg));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, ..ProptestConfig::default() })]

    /// PROPERTY: a package name appears at most once across all projects
    #[test]
    fn prop_package_names_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut registry = Registry::new();
        apply(&mut registry, &ops);

        let mut seen = HashSet::new();
        for project in registry.projects() {
            for app in &project.apps {
                prop_assert!(seen.insert(app.package_name.clone()), "duplicate {}", app.package_name);
            }
        }
    }

    /// PROPERTY: builds are newest first and no node is ever left empty
    #[test]
    fn prop_newest_first_and_no_empty_nodes(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut registry = Registry::new();
        apply(&mut registry, &ops);

        for project in registry.projects() {
            prop_assert!(!project.apps.is_empty());
            for app in &project.apps {
                prop_assert!(!app.builds.is_empty());
                for pair in app.builds.windows(2) {
                    prop_assert!(pair[0].upload_time > pair[1].upload_time);
                }
            }
        }
    }

    /// PROPERTY: file names stay unique across the registry
    #[test]
    fn prop_file_names_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut registry = Registry::new();
        apply(&mut registry, &ops);

        let mut seen = HashSet::new();
        for project in registry.projects() {
            for app in &project.apps {
                for b in &app.builds {
                    prop_assert!(seen.insert(b.file_name.clone()));
                    prop_assert!(registry.contains_file(&b.file_name));
                }
            }
        }
    }

    /// PROPERTY: removing an unknown build or app leaves the registry untouched
    #[test]
    fn prop_unknown_removal_is_noop(
        ops in prop::collection::vec(op_strategy(), 0..30),
        pkg in 0u8..8,
    ) {
        let mut registry = Registry::new();
        apply(&mut registry, &ops);
        let before = registry.clone();

        prop_assert!(registry.remove_build(&package(pkg), "missing.apk").is_err());
        prop_assert_eq!(&registry, &before);

        if registry.find_app(&package(pkg)).is_none() {
            prop_assert!(registry.remove_app(&package(pkg)).is_err());
            prop_assert_eq!(&registry, &before);
        }
    }

    /// PROPERTY: an upload always lands as the newest build of its app
    #[test]
    fn prop_upsert_becomes_latest(
        ops in prop::collection::vec(op_strategy(), 0..30),
        pkg in 0u8..5,
    ) {
        let mut registry = Registry::new();
        apply(&mut registry, &ops);
        let before = registry.find_app(&package(pkg)).map(|a| a.builds.len()).unwrap_or(0);

        let fresh = build(1000);
        registry.upsert_build(
            "Elsewhere",
            AppInfo {
                app_name: "Renamed".to_string(),
                package_name: package(pkg),
                icon_path: None,
            },
            fresh.clone(),
        );

        let app = registry.find_app(&package(pkg)).unwrap();
        prop_assert_eq!(app.latest(), Some(&fresh));
        prop_assert_eq!(app.builds.len(), before + 1);
        prop_assert_eq!(app.app_name.as_str(), "Renamed");
    }
}
