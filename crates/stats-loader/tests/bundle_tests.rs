//! Bundle, entrypoint and asset lookups through the engine.

mod helpers;

use helpers::{APP_MANIFEST, Project, names};
use stats_loader::{ConfigError, Error, FakeLoader};

#[test]
fn bundle_chunks_keep_manifest_order() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|_| {});

    let main = engine.get_bundle("DEFAULT", "main").unwrap();
    assert_eq!(names(&main), vec!["main.js", "main.css"]);
    assert_eq!(main[0].url, "/static/webpack_bundles/main.js");
    assert_eq!(main[1].url, "/static/webpack_bundles/main.css");
}

#[test]
fn ignore_patterns_drop_chunks() {
    let project = Project::new(APP_MANIFEST);

    // Default patterns drop source maps
    let engine = project.engine(|_| {});
    assert_eq!(
        names(&engine.get_bundle("DEFAULT", "app1").unwrap()),
        vec!["vendors.js", "app1.css", "app1.js"]
    );

    let engine = project.engine(|opts| opts.ignore = vec![r".+\.css$".to_string()]);
    assert_eq!(
        names(&engine.get_bundle("DEFAULT", "app1").unwrap()),
        vec!["vendors.js", "app1.js", "app1.js.map"]
    );
}

#[test]
fn unknown_bundle_is_reported() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|_| {});

    let err = engine.get_bundle("DEFAULT", "missing").unwrap_err();
    assert!(matches!(err, Error::BundleNotFound(_)));
    assert_eq!(err.to_string(), "Cannot resolve bundle missing.");
}

#[test]
fn failed_build_surfaces_bundler_message() {
    let project = Project::new(
        r#"{
            "status": "error",
            "error": "ModuleNotFoundError",
            "file": "./assets/js/main.js",
            "message": "Module not found: Error: Can't resolve 'foo'"
        }"#,
    );
    let engine = project.engine(|_| {});

    let err = engine.get_bundle("DEFAULT", "main").unwrap_err();
    assert!(matches!(err, Error::Build { .. }));
    let message = err.to_string();
    assert!(message.starts_with("ModuleNotFoundError in ./assets/js/main.js"));
    assert!(message.contains("Can't resolve 'foo'"));
}

#[test]
fn manifest_without_status_is_invalid() {
    let project = Project::new(r#"{"chunks": {"main": ["main.js"]}}"#);
    let engine = project.engine(|_| {});

    let err = engine.get_bundle("DEFAULT", "main").unwrap_err();
    assert!(matches!(err, Error::ManifestInvalid(ref msg) if msg.contains("webpack-bundle-tracker")));
}

#[test]
fn entrypoint_flattens_groups() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|_| {});

    assert_eq!(
        names(&engine.get_entry("DEFAULT", "app1").unwrap()),
        vec!["runtime.js", "vendors.js", "app1.css", "app1.js"]
    );

    let engine = project.engine(|opts| {
        opts.exclude_runtime = true;
        opts.base_entrypoint = Some("common".to_string());
    });
    assert_eq!(
        names(&engine.get_entry("DEFAULT", "app1").unwrap()),
        vec!["app1.css", "app1.js"]
    );
}

#[test]
fn unique_entrypoint_files_are_listed_once() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|_| {});

    let files = engine
        .get_unique_entrypoint_files("DEFAULT", &["app1", "app2"], None)
        .unwrap();
    assert_eq!(
        names(&files),
        vec!["runtime.js", "vendors.js", "app1.css", "app1.js", "app2.js"]
    );

    let scripts = engine
        .get_unique_entrypoint_files("DEFAULT", &["app1", "app2"], Some("js"))
        .unwrap();
    assert_eq!(
        names(&scripts),
        vec!["runtime.js", "vendors.js", "app1.js", "app2.js"]
    );
}

#[test]
fn static_url_uses_storage_without_public_path() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|_| {});
    assert_eq!(
        engine.get_static_url("DEFAULT", "logo.png").unwrap(),
        "/static/logo.png"
    );

    project.rewrite(r#"{"status": "done", "publicPath": "https://cdn.example.com/assets/"}"#);
    let engine = project.engine(|_| {});
    assert_eq!(
        engine.get_static_url("DEFAULT", "logo.png").unwrap(),
        "https://cdn.example.com/assets/logo.png"
    );
}

#[test]
fn asset_public_path_wins_over_storage() {
    let project = Project::new(
        r#"{
            "status": "done",
            "chunks": {"main": ["main.js"]},
            "assets": {"main.js": {"name": "main.js", "publicPath": "https://cdn.example.com/main.js"}}
        }"#,
    );
    let engine = project.engine(|_| {});
    assert_eq!(
        engine.get_bundle("DEFAULT", "main").unwrap()[0].url,
        "https://cdn.example.com/main.js"
    );
}

#[test]
fn asset_by_source_filename() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|_| {});

    let asset = engine
        .get_asset_by_source_filename("DEFAULT", "assets/logo.png")
        .unwrap()
        .unwrap();
    assert_eq!(asset.name, "logo.png");
    assert!(
        engine
            .get_asset_by_source_filename("DEFAULT", "assets/nope.png")
            .unwrap()
            .is_none()
    );
}

#[test]
fn fake_loader_needs_no_stats_file() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|opts| {
        opts.loader_class = "fake".to_string();
        opts.stats_file = project.dir.path().join("absent.json");
    });

    let bundle = engine.get_bundle("DEFAULT", "anything").unwrap();
    assert_eq!(bundle.len(), 1);
    assert_eq!(bundle[0].url, FakeLoader::BUNDLE_URL);
}

#[test]
fn unknown_loader_class_is_reported() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|opts| opts.loader_class = "rollup".to_string());

    let err = engine.get_bundle("DEFAULT", "main").unwrap_err();
    assert!(matches!(err, Error::UnknownLoader { ref loader, .. } if loader == "rollup"));
}

#[test]
fn unknown_profile_is_reported() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|_| {});

    let err = engine.get_bundle("ADMIN", "main").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ProfileNotFound(_))));
}

#[test]
fn locale_selects_its_own_stats_file() {
    let project = Project::new(APP_MANIFEST);
    let french = project.dir.path().join("webpack-stats.fr.json");
    helpers::write_manifest(
        &french,
        r#"{
            "status": "done",
            "chunks": {"main": ["main.fr.js"]},
            "assets": {"main.fr.js": {"name": "main.fr.js"}}
        }"#,
    );
    let template = project.dir.path().join("webpack-stats.{locale}.json");
    let engine = project.engine(|opts| opts.stats_file = template);

    let options = stats_loader::TagOptions::new().locale("fr");
    let tags = engine.get_as_tags("DEFAULT", "main", &options, None).unwrap();
    assert_eq!(
        tags,
        vec![r#"<script src="/static/webpack_bundles/main.fr.js" ></script>"#]
    );
}
