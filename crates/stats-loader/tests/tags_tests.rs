//! Tag rendering and per-request suppression of common chunks.

mod helpers;

use helpers::{APP_MANIFEST, Project, names};
use stats_loader::{RequestContext, TagOptions};

#[test]
fn renders_script_and_style_tags() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|_| {});

    let tags = engine
        .get_as_tags("DEFAULT", "main", &TagOptions::new(), None)
        .unwrap();
    assert_eq!(
        tags,
        vec![
            r#"<script src="/static/webpack_bundles/main.js" ></script>"#,
            r#"<link href="/static/webpack_bundles/main.css" rel="stylesheet" />"#,
        ]
    );

    let styles = engine
        .get_as_tags("DEFAULT", "main", &TagOptions::new().extension("css").preload(true), None)
        .unwrap();
    assert_eq!(
        styles,
        vec![r#"<link href="/static/webpack_bundles/main.css" rel="preload" as="style" />"#]
    );
}

#[test]
fn common_chunks_are_skipped_within_a_request() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|_| {});
    let skip = TagOptions::new().extension("js").skip_common_chunks(true);
    let mut request = RequestContext::new();

    let first = engine
        .get_as_tags("DEFAULT", "app1", &skip, Some(&mut request))
        .unwrap();
    assert_eq!(first.len(), 2);
    assert!(first[0].contains("vendors.js"));

    let second = engine
        .get_as_tags("DEFAULT", "app2", &skip, Some(&mut request))
        .unwrap();
    assert_eq!(
        second,
        vec![r#"<script src="/static/webpack_bundles/app2.js" ></script>"#]
    );

    // A fresh request starts over
    let mut next_request = RequestContext::new();
    let again = engine
        .get_as_tags("DEFAULT", "app2", &skip, Some(&mut next_request))
        .unwrap();
    assert_eq!(again.len(), 2);
}

#[test]
fn urls_are_recorded_even_without_skipping() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|_| {});
    let mut request = RequestContext::new();

    let all = engine
        .get_as_tags("DEFAULT", "app1", &TagOptions::new(), Some(&mut request))
        .unwrap();
    assert_eq!(all.len(), 3);
    assert!(request.used_urls.contains("/static/webpack_bundles/vendors.js"));

    // Not skipping: vendors.js repeats
    let repeated = engine
        .get_as_tags("DEFAULT", "app2", &TagOptions::new(), Some(&mut request))
        .unwrap();
    assert_eq!(repeated.len(), 2);

    // Skipping later in the same request sees what was emitted earlier
    let skipped = engine
        .get_as_tags(
            "DEFAULT",
            "app2",
            &TagOptions::new().skip_common_chunks(true),
            Some(&mut request),
        )
        .unwrap();
    assert!(skipped.is_empty());
}

#[test]
fn profile_default_can_be_overridden_per_call() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|opts| opts.skip_common_chunks = true);
    let mut request = RequestContext::new();

    engine
        .get_as_tags("DEFAULT", "app1", &TagOptions::new(), Some(&mut request))
        .unwrap();

    let by_default = engine
        .get_as_tags("DEFAULT", "app2", &TagOptions::new(), Some(&mut request))
        .unwrap();
    assert_eq!(by_default.len(), 1);

    let overridden = engine
        .get_as_tags(
            "DEFAULT",
            "app2",
            &TagOptions::new().skip_common_chunks(false),
            Some(&mut request),
        )
        .unwrap();
    assert_eq!(overridden.len(), 2);
}

#[test]
fn skipping_without_a_request_renders_everything() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|opts| opts.skip_common_chunks = true);

    let first = engine
        .get_as_tags("DEFAULT", "app1", &TagOptions::new(), None)
        .unwrap();
    let second = engine
        .get_as_tags("DEFAULT", "app2", &TagOptions::new(), None)
        .unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 2);
}

#[test]
fn entrypoint_tags_share_request_state_with_bundles() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|_| {});
    let skip = TagOptions::new().skip_common_chunks(true);
    let mut request = RequestContext::new();

    let app1 = engine
        .get_entrypoint_tags("DEFAULT", "app1", &skip, Some(&mut request))
        .unwrap();
    assert_eq!(app1.len(), 4);

    let app2 = engine
        .get_entrypoint_tags("DEFAULT", "app2", &skip, Some(&mut request))
        .unwrap();
    assert_eq!(
        app2,
        vec![r#"<script src="/static/webpack_bundles/app2.js" ></script>"#]
    );
}

#[test]
fn files_follow_the_same_rules_as_tags() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|_| {});
    let mut request = RequestContext::new();

    let css = engine
        .get_files("DEFAULT", "app1", &TagOptions::new().extension("css"), None)
        .unwrap();
    assert_eq!(names(&css), vec!["app1.css"]);

    let skip = TagOptions::new().skip_common_chunks(true);
    engine
        .get_files("DEFAULT", "app1", &skip, Some(&mut request))
        .unwrap();
    let rest = engine
        .get_files("DEFAULT", "app2", &skip, Some(&mut request))
        .unwrap();
    assert_eq!(names(&rest), vec!["app2.js"]);
    assert_eq!(rest[0].url, "/static/webpack_bundles/app2.js");
}

#[test]
fn integrity_with_multiple_hashes() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|opts| opts.integrity = true);
    let mut request = RequestContext::new().with_host("example.com");

    let tags = engine
        .get_as_tags("DEFAULT", "main", &TagOptions::new(), Some(&mut request))
        .unwrap();
    assert_eq!(
        tags,
        vec![
            r#"<script src="/static/webpack_bundles/main.js" integrity="sha256-AAA sha384-BBB" ></script>"#,
            r#"<link href="/static/webpack_bundles/main.css" rel="stylesheet" integrity="sha256-CCC" />"#,
        ]
    );
}

#[test]
fn nonce_and_suffix() {
    let project = Project::new(APP_MANIFEST);
    let engine = project.engine(|opts| opts.csp_nonce = true);
    let mut request = RequestContext::new().with_csp_nonce("r4nd0m");

    let tags = engine
        .get_as_tags(
            "DEFAULT",
            "main",
            &TagOptions::new().extension("js").suffix("?v=2").attrs("defer"),
            Some(&mut request),
        )
        .unwrap();
    assert_eq!(
        tags,
        vec![r#"<script src="/static/webpack_bundles/main.js?v=2" nonce="r4nd0m" defer></script>"#]
    );
}
