use assert_cmd::Command;
use indoc::indoc;
use predicates::prelude::*;

fn pkgver() -> Command {
    let mut command = Command::cargo_bin("pkgver").unwrap();
    command.env_remove("RUST_LOG");
    command.env_remove("PKGVER_STRICT");
    command.env_remove("PKGVER_FORMAT");
    command
}

#[test]
fn sort_args() {
    pkgver()
        .args(["sort", "2.0", "1.0.post1", "1.0", "1.0a1", "1.0.dev1"])
        .assert()
        .success()
        .stdout(indoc! {"
            1.0.dev1
            1.0a1
            1.0
            1.0.post1
            2.0
        "});
}

#[test]
fn sort_keeps_input_spelling() {
    pkgver()
        .args(["sort", "1.0.0", "1.0RC1", "1.0"])
        .assert()
        .success()
        .stdout(indoc! {"
            1.0RC1
            1.0.0
            1.0
        "});
}

#[test]
fn sort_legacy_first() {
    pkgver()
        .args(["sort", "2.0", "french toast", "1!0.1", "1.0"])
        .assert()
        .success()
        .stdout(indoc! {"
            french toast
            1.0
            2.0
            1!0.1
        "});
}

#[test]
fn sort_reverse() {
    pkgver()
        .args(["sort", "--reverse", "1.2", "1.10", "1.9"])
        .assert()
        .success()
        .stdout(indoc! {"
            1.10
            1.9
            1.2
        "});
}

#[test]
fn sort_stdin() {
    pkgver()
        .arg("sort")
        .write_stdin("1.10\n  1.9\n\n1.2\n")
        .assert()
        .success()
        .stdout(indoc! {"
            1.2
            1.9
            1.10
        "});
}

#[test]
fn sort_strict_rejects_legacy() {
    pkgver()
        .args(["sort", "--strict", "1.0", "french toast"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Invalid version: `french toast`"));
}

#[test]
fn sort_strict_from_env() {
    pkgver()
        .args(["sort", "1.0", "french toast"])
        .env("PKGVER_STRICT", "true")
        .assert()
        .code(2);
}

#[test]
fn compare() {
    for (left, right, expected) in [
        ("1.0", "1.0.0", "==\n"),
        ("1.0a1", "1.0", "<\n"),
        ("1!0.1", "2.0", ">\n"),
        ("1.0+1", "1.0+abc", ">\n"),
        ("french toast", "0.0.dev0", "<\n"),
    ] {
        pkgver()
            .args(["compare", left, right])
            .assert()
            .success()
            .stdout(expected);
    }
}

#[test]
fn compare_strict() {
    pkgver()
        .args(["compare", "--strict", "1.0", "1.0-final-x"])
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("Failed to parse the right-hand version")
                .and(predicate::str::contains("Caused by")),
        );
}

#[test]
fn inspect_text() {
    pkgver()
        .args(["inspect", "1!1.0RC1.post2+Ubuntu-1"])
        .assert()
        .success()
        .stdout(indoc! {"
            version: 1!1.0rc1.post2+ubuntu.1 (PEP 440)
            public: 1!1.0rc1.post2
            base_version: 1!1.0
            local: ubuntu.1
            epoch: 1
            release: 1.0
            is_prerelease: true
            is_postrelease: true
            is_devrelease: false
        "});
}

#[test]
fn inspect_huge_release() {
    pkgver()
        .args(["inspect", "--strict", "1.099999999999999999999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("version: 1.99999999999999999999 (PEP 440)"))
        .stdout(predicate::str::contains("release: 1.99999999999999999999"));
}

#[test]
fn sort_huge_release() {
    pkgver()
        .args(["sort", "1.99999999999999999999", "1.2", "2.0"])
        .assert()
        .success()
        .stdout(indoc! {"
            1.2
            1.99999999999999999999
            2.0
        "});
}

#[test]
fn inspect_legacy() {
    pkgver()
        .args(["inspect", "french toast"])
        .assert()
        .success()
        .stdout(indoc! {"
            version: french toast (legacy)
            public: french toast
            base_version: french toast
            local: -
            is_prerelease: false
            is_postrelease: false
            is_devrelease: false
        "});
}

#[test]
fn inspect_json() {
    let output = pkgver()
        .args(["inspect", "--format", "json", "1.0.dev3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report,
        serde_json::json!({
            "kind": "pep440",
            "version": "1.0.dev3",
            "public": "1.0.dev3",
            "base_version": "1.0",
            "local": null,
            "epoch": "0",
            "release": ["1", "0"],
            "is_prerelease": true,
            "is_postrelease": false,
            "is_devrelease": true,
        })
    );
}

#[test]
fn inspect_json_from_env() {
    let output = pkgver()
        .args(["inspect", "not-a-version"])
        .env("PKGVER_FORMAT", "json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kind"], "legacy");
    assert_eq!(report["local"], serde_json::Value::Null);
    assert!(report.get("epoch").is_none());
}
