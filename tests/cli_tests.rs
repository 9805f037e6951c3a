//! End-to-end CLI tests.

mod harness;

use harness::TestEnv;
use predicates::prelude::*;

#[test]
fn test_set_get_roundtrip() {
    let env = TestEnv::new();

    env.cmd()
        .args(["set", "server.ip", "10.0.0.1"])
        .assert()
        .success();
    env.cmd()
        .args(["get", "server.ip"])
        .assert()
        .success()
        .stdout("10.0.0.1\n");
}

#[test]
fn test_get_missing_key_fails() {
    let env = TestEnv::new();

    env.cmd()
        .args(["get", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key not found"));
}

#[test]
fn test_rm_leaves_empty_subtree() {
    let env = TestEnv::new();

    env.cmd()
        .args(["set", "server.ip", "10.0.0.1"])
        .assert()
        .success();
    env.cmd().args(["rm", "server.ip"]).assert().success();
    env.cmd()
        .args(["get", "server"])
        .assert()
        .success()
        .stdout("{}\n");
}

#[test]
fn test_rm_missing_key_writes_nothing() {
    let env = TestEnv::new();

    env.cmd().args(["set", "a", "1"]).assert().success();
    let before = std::fs::read_to_string(env.data_path()).unwrap();

    env.cmd()
        .args(["rm", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key not found"));

    let after = std::fs::read_to_string(env.data_path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_set_via_piped_stdin() {
    let env = TestEnv::new();

    env.cmd()
        .args(["set", "db.host"])
        .write_stdin("localhost\n")
        .assert()
        .success();
    env.cmd()
        .args(["get", "db.host"])
        .assert()
        .success()
        .stdout("localhost\n");
}

#[test]
fn test_list_and_search_mask_encrypted_values() {
    let env = TestEnv::new();
    env.write_data(
        r#"{"db": {"host": "localhost", "password": "encv1:c2VjcmV0Ynl0ZXM"}}"#,
    );

    env.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[encrypted]"))
        .stdout(predicate::str::contains("encv1:").not());

    // Plaintext search never matches inside ciphertext.
    env.cmd()
        .args(["search", "c2VjcmV0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no matches"));

    env.cmd()
        .args(["search", "localhost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("db.host = localhost"));
}

#[test]
fn test_export_masks_ciphertext() {
    let env = TestEnv::new();
    env.write_data(r#"{"token": "encv1:c2VjcmV0"}"#);

    env.cmd()
        .args(["export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[encrypted]"))
        .stdout(predicate::str::contains("encv1:").not());
}

#[test]
fn test_alias_resolution() {
    let env = TestEnv::new();

    env.cmd()
        .args(["alias", "add", "prod", "server.production.ip"])
        .assert()
        .success();
    env.cmd()
        .args(["set", "prod", "1.2.3.4"])
        .assert()
        .success();
    env.cmd()
        .args(["get", "server.production.ip"])
        .assert()
        .success()
        .stdout("1.2.3.4\n");
}

#[test]
fn test_guarded_rm_requires_confirmation() {
    let env = TestEnv::new();

    env.cmd().args(["set", "prod.key", "v"]).assert().success();
    env.cmd()
        .args(["guard", "add", "prod.key"])
        .assert()
        .success();

    // No terminal is attached, so the confirmation prompt must fail and
    // the value must survive.
    env.cmd()
        .args(["rm", "prod.key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal required"));
    env.cmd()
        .args(["get", "prod.key"])
        .assert()
        .success()
        .stdout("v\n");

    env.cmd().args(["rm", "--yes", "prod.key"]).assert().success();
    env.cmd().args(["get", "prod.key"]).assert().failure();
}

#[test]
fn test_import_preview_is_read_only() {
    let env = TestEnv::new();
    env.cmd().args(["set", "a", "1"]).assert().success();

    let incoming = env.dir.path().join("incoming.json");
    std::fs::write(&incoming, r#"{"a": 1, "b": 2}"#).unwrap();

    env.cmd()
        .args(["import", "--preview"])
        .arg(&incoming)
        .assert()
        .success()
        .stdout(predicate::str::contains("+ b = 2"));

    env.cmd().args(["get", "b"]).assert().failure();
}

#[test]
fn test_import_applies_merge() {
    let env = TestEnv::new();
    env.cmd().args(["set", "a", "1"]).assert().success();

    let incoming = env.dir.path().join("incoming.json");
    std::fs::write(&incoming, r#"{"b": 2}"#).unwrap();

    env.cmd()
        .args(["import", "--yes"])
        .arg(&incoming)
        .assert()
        .success();

    env.cmd().args(["get", "a"]).assert().success().stdout("1\n");
    env.cmd().args(["get", "b"]).assert().success().stdout("2\n");
}

#[test]
fn test_import_replace_shows_removes() {
    let env = TestEnv::new();
    env.cmd().args(["set", "old", "1"]).assert().success();

    let incoming = env.dir.path().join("incoming.json");
    std::fs::write(&incoming, r#"{"new": 2}"#).unwrap();

    env.cmd()
        .args(["import", "--replace", "--yes"])
        .arg(&incoming)
        .assert()
        .success()
        .stdout(predicate::str::contains("- old"))
        .stdout(predicate::str::contains("+ new = 2"));

    env.cmd().args(["get", "old"]).assert().failure();
}

#[test]
fn test_import_rejects_array_root() {
    let env = TestEnv::new();
    env.cmd().args(["set", "a", "1"]).assert().success();

    let incoming = env.dir.path().join("incoming.json");
    std::fs::write(&incoming, "[1, 2]").unwrap();

    env.cmd()
        .args(["import", "--yes"])
        .arg(&incoming)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid store shape"));

    env.cmd().args(["get", "a"]).assert().success().stdout("1\n");
}

#[test]
fn test_completions_generate() {
    let env = TestEnv::new();
    env.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keynest"));
}
