use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn postflow(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("postflow").unwrap();
    cmd.env_remove("POSTFLOW_USER")
        .arg("--no-color")
        .arg("--data-dir")
        .arg(data_dir.path());
    cmd
}

#[test]
fn test_help() {
    Command::cargo_bin("postflow")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("editorial workflow"));
}

#[test]
fn test_init_writes_store_and_config() {
    let data = TempDir::new().unwrap();
    postflow(&data).arg("init").assert().success();

    assert!(data.path().join("store.json").exists());
    assert!(data.path().join("config.toml").exists());

    postflow(&data)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_publication_flow() {
    let data = TempDir::new().unwrap();
    postflow(&data).arg("init").assert().success();

    postflow(&data)
        .args(["post", "create", "Release notes", "--tag", "news"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created post 1"));

    postflow(&data)
        .args(["post", "approve", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Illegal transition from Draft to Approved"));

    for step in ["submit", "approve", "publish"] {
        postflow(&data).args(["post", step, "1"]).assert().success();
    }

    postflow(&data)
        .args(["post", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published"));

    postflow(&data)
        .args(["post", "revert", "1"])
        .assert()
        .failure();

    postflow(&data)
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"published\": 1"));
}

#[test]
fn test_discussion_flow() {
    let data = TempDir::new().unwrap();
    postflow(&data)
        .args(["post", "create", "Draft"])
        .assert()
        .success();

    postflow(&data)
        .args(["comment", "add", "1", "Needs a summary"])
        .assert()
        .success();
    postflow(&data)
        .args(["--user", "2", "comment", "reply", "1", "Added"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added reply 2 to comment 1"));
    postflow(&data)
        .args(["comment", "reply", "2", "Thanks"])
        .assert()
        .success();
    postflow(&data)
        .args(["comment", "reply", "3", "Deepest"])
        .assert()
        .success();
    postflow(&data)
        .args(["comment", "reply", "4", "Too deep"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("depth 3"));

    postflow(&data)
        .args(["comment", "resolve", "1"])
        .assert()
        .success();
    postflow(&data)
        .args(["comment", "thread", "1", "--hide-resolved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Needs a summary").not());

    postflow(&data)
        .args(["comment", "delete", "1", "--yes"])
        .assert()
        .success();
    postflow(&data)
        .args(["comment", "thread", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added"));
}

#[test]
fn test_reply_to_missing_parent() {
    let data = TempDir::new().unwrap();
    postflow(&data)
        .args(["comment", "reply", "9", "Hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parent comment not found: 9"));
}
