use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

const GOOD_SCENARIO: &str = r#"{
    "name": "endpoint-lifecycle",
    "identity_paths": {
        "endpoint": "{{basePath}}projects/{{project}}/locations/{{location}}/endpoints/{{name}}"
    },
    "steps": [
        {
            "kind": "apply",
            "template": "resource \"endpoint\" { name = \"%{random_suffix}\" }",
            "resources": [
                {
                    "resource_type": "endpoint",
                    "location": "us-central1",
                    "name": "ep-%{random_suffix}",
                    "attributes": {
                        "display_name": "sample-endpoint",
                        "labels": { "label-one": "value-one" }
                    }
                }
            ]
        },
        {
            "kind": "import_verify",
            "resource": {
                "resource_type": "endpoint",
                "location": "us-central1",
                "name": "ep-%{random_suffix}"
            },
            "ignored_fields": ["etag", "region"]
        }
    ]
}"#;

const BAD_ORDER_SCENARIO: &str = r#"{
    "name": "bad-order",
    "steps": [
        {
            "kind": "import_verify",
            "resource": {
                "resource_type": "endpoint",
                "location": "us-central1",
                "name": "ep-1"
            }
        }
    ]
}"#;

fn write_scenario(dir: &tempfile::TempDir, file: &str, content: &str) -> PathBuf {
    let path = dir.path().join(file);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_validate_accepts_well_formed_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(&dir, "good.json", GOOD_SCENARIO);

    let mut cmd = Command::cargo_bin("drift").unwrap();
    cmd.arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("endpoint-lifecycle (2 steps)"));
}

#[test]
fn test_validate_rejects_import_before_apply() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(&dir, "bad.json", BAD_ORDER_SCENARIO);

    let mut cmd = Command::cargo_bin("drift").unwrap();
    cmd.arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("no earlier apply step declares it"));
}

#[test]
fn test_validate_reports_each_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_scenario(&dir, "good.json", GOOD_SCENARIO);
    let bad = write_scenario(&dir, "bad.json", BAD_ORDER_SCENARIO);

    let mut cmd = Command::cargo_bin("drift").unwrap();
    cmd.arg("validate")
        .arg(&good)
        .arg(&bad)
        .assert()
        .failure()
        .stdout(predicate::str::contains("endpoint-lifecycle"))
        .stderr(predicate::str::contains("1 of 2 scenario file(s) invalid"));
}

#[test]
fn test_run_requires_remote_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(&dir, "good.json", GOOD_SCENARIO);

    let mut cmd = Command::cargo_bin("drift").unwrap();
    cmd.env_remove("DRIFTCHECK_BASE_URL")
        .env_remove("DRIFTCHECK_PROJECT")
        .env_remove("DRIFTCHECK_API_TOKEN")
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("DRIFTCHECK_BASE_URL"));
}

#[test]
fn test_version_prints_package_version() {
    let mut cmd = Command::cargo_bin("drift").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
