//! `edgeship bindings` end to end

mod common;

use common::*;

#[test]
fn table_lists_bindings_in_priority_order() {
    let env = TestEnv::with_manifest(VALID_MANIFEST);

    let result = env.run(&["bindings"]);

    assert!(result.success, "{}", result.stderr);
    insta::assert_snapshot!(result.stdout.trim_end(), @r"
    [BINDINGS] Edgeship Bindings
    Worker: api
    NAME    TYPE                 RESOURCE
    CACHE   KV Namespace         ns-1
    ASSETS  R2 Bucket            assets
    MODE    Environment Variable production
    RETRIES Environment Variable 3
    AUTH    Service              auth-worker
    ");
}

#[test]
fn conflicts_are_flagged_not_rejected() {
    let env = TestEnv::with_manifest(CONFLICTING_MANIFEST);

    let result = env.run(&["--json", "bindings"]);

    assert!(result.success, "{}", result.stderr);
    let events = result.json_lines();
    assert_eq!(events[0]["event"], "bindings");
    let rows = events[0]["bindings"].as_array().expect("rows");
    let names: Vec<&str> = rows.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names, vec!["X", "Y", "Y", "X"]);
    assert!(rows.iter().all(|r| r["conflict"] == true));
    assert_eq!(rows[3]["kind"], "r2_bucket");
}

#[test]
fn text_output_warns_about_shared_names() {
    let env = TestEnv::with_manifest(CONFLICTING_MANIFEST);

    let result = env.run(&["bindings"]);

    assert!(result.success, "{}", result.stderr);
    assert!(
        result
            .stdout
            .contains("[WARN] Some binding names are shared; `edgeship check` will fail."),
        "{}",
        result.stdout
    );
}

#[test]
fn environment_without_bindings_is_empty() {
    let env = TestEnv::with_manifest(&format!("{VALID_MANIFEST}\n[env.staging]\n"));

    let result = env.run(&["bindings", "--env", "staging"]);

    assert!(result.success, "{}", result.stderr);
    assert!(result.stdout.contains("Worker: api-staging"), "{}", result.stdout);
    assert!(result.stdout.contains("No bindings declared."), "{}", result.stdout);
    assert!(
        result.stderr.contains("\"vars\" exists at the top level"),
        "{}",
        result.stderr
    );
}

#[test]
fn unknown_environment_lists_available() {
    let env = TestEnv::with_manifest(&format!("{VALID_MANIFEST}\n[env.staging]\n"));

    let result = env.run(&["bindings", "--env", "prod"]);

    assert_eq!(result.exit_code, 10);
    assert!(result.stderr.contains("no environment named \"prod\""), "{}", result.stderr);
    assert!(result.stderr.contains("available: staging"), "{}", result.stderr);
}
