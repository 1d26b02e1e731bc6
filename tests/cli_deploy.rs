//! `edgeship deploy` end to end, without a live control plane

mod common;

use common::*;

#[test]
fn dry_run_prints_upload_metadata() {
    let env = TestEnv::with_manifest(VALID_MANIFEST);

    let result = env.run(&["deploy", "--dry-run"]);

    assert!(result.success, "deploy failed: {}", result.stderr);
    assert!(result.stdout.contains("[DEPLOY] Edgeship Deploy"), "{}", result.stdout);
    assert!(result.stdout.contains("Mode: Dry run"), "{}", result.stdout);
    assert!(result.stdout.contains("Upload metadata:"), "{}", result.stdout);
    assert!(result.stdout.contains("\"main_module\": \"index.js\""), "{}", result.stdout);
    assert!(result.stdout.contains("[OK] Dry run complete: api"), "{}", result.stdout);
}

#[test]
fn dry_run_json_emits_payload_in_binding_order() {
    let env = TestEnv::with_manifest(VALID_MANIFEST);

    let result = env.run(&["--json", "deploy", "--dry-run"]);

    assert!(result.success, "{}", result.stderr);
    let events = result.json_lines();
    assert!(events.iter().all(|e| e["command"] == "deploy"));
    assert_eq!(events[0]["event"], "start");
    assert_eq!(events[0]["dry_run"], true);

    let payload = events
        .iter()
        .find(|e| e["event"] == "payload")
        .expect("payload event");
    let metadata = &payload["metadata"];
    assert_eq!(metadata["main_module"], "index.js");
    assert_eq!(metadata["compatibility_date"], "2024-01-01");

    let bindings = metadata["bindings"].as_array().expect("bindings");
    let summary: Vec<(&str, &str)> = bindings
        .iter()
        .map(|b| {
            (
                b["name"].as_str().unwrap_or_default(),
                b["type"].as_str().unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("CACHE", "kv_namespace"),
            ("ASSETS", "r2_bucket"),
            ("MODE", "plain_text"),
            ("RETRIES", "json"),
            ("AUTH", "service"),
        ]
    );
    assert_eq!(bindings[0]["namespace_id"], "ns-1");
    assert_eq!(bindings[3]["json"], 3);
}

#[test]
fn dry_run_writes_outdir() {
    let env = TestEnv::with_manifest(VALID_MANIFEST);

    let result = env.run(&["deploy", "--dry-run", "--outdir", "dist"]);

    assert!(result.success, "{}", result.stderr);
    let metadata = std::fs::read_to_string(env.project_path("dist/metadata.json"))
        .expect("metadata.json written");
    let metadata: serde_json::Value = serde_json::from_str(&metadata).expect("valid JSON");
    assert_eq!(metadata["main_module"], "index.js");
    assert_eq!(
        std::fs::read_to_string(env.project_path("dist/index.js")).expect("module written"),
        WORKER_SOURCE
    );
}

#[test]
fn conflicting_bindings_abort_before_bundling() {
    let env = TestEnv::with_manifest(CONFLICTING_MANIFEST);

    let result = env.run(&["deploy", "--dry-run", "--outdir", "dist"]);

    assert_eq!(result.exit_code, 10);
    assert!(
        result
            .stderr
            .contains("Y assigned to multiple KV Namespace bindings."),
        "{}",
        result.stderr
    );
    assert!(!env.project_path("dist").exists());
}

#[test]
fn deploy_without_token_fails_with_config_exit_code() {
    let env = TestEnv::with_manifest(VALID_MANIFEST);

    let result = env.run(&["deploy"]);

    assert_eq!(result.exit_code, 10);
    assert!(result.stderr.contains("missing API token"), "{}", result.stderr);
}

#[test]
fn deploy_with_token_but_no_account_fails() {
    let env = TestEnv::with_manifest(VALID_MANIFEST);

    let result = env.run_with_env(&["deploy"], &[("EDGESHIP_API_TOKEN", "t0ken")]);

    assert_eq!(result.exit_code, 10);
    assert!(result.stderr.contains("missing account id"), "{}", result.stderr);
}

#[test]
fn conflicts_are_reported_before_credentials() {
    let env = TestEnv::with_manifest(CONFLICTING_MANIFEST);

    let result = env.run_with_env(&["deploy"], &[("EDGESHIP_API_TOKEN", "t0ken")]);

    assert_eq!(result.exit_code, 10);
    assert!(
        result
            .stderr
            .contains("X assigned to KV Namespace and R2 Bucket bindings."),
        "{}",
        result.stderr
    );
    assert!(!result.stderr.contains("missing account id"), "{}", result.stderr);
}

#[test]
fn unreachable_control_plane_fails_with_network_exit_code() {
    let env = TestEnv::with_manifest(VALID_MANIFEST);

    let result = env.run_with_env(
        &["deploy"],
        &[
            ("EDGESHIP_API_TOKEN", "t0ken"),
            ("EDGESHIP_ACCOUNT_ID", "acct"),
            ("EDGESHIP_API_BASE_URL", "http://127.0.0.1:9"),
        ],
    );

    assert_eq!(result.exit_code, 40, "{}", result.stderr);
    assert!(result.stderr.contains("Script upload failed"), "{}", result.stderr);
}

#[test]
fn missing_entry_point_is_a_config_error() {
    let env = TestEnv::new();
    env.write_project_file(
        "edgeship.toml",
        "name = \"api\"\ncompatibility_date = \"2024-01-01\"\n",
    );

    let result = env.run(&["deploy", "--dry-run"]);

    assert_eq!(result.exit_code, 10);
    assert!(result.stderr.contains("missing entry point"), "{}", result.stderr);
}
