use assert_cmd::Command;

#[test]
fn runs() {
    let mut cmd = Command::cargo_bin("iiifgen").unwrap();
    cmd.assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = Command::cargo_bin("iiifgen").unwrap();
    cmd.arg("-V");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("iiifgen"));
}

// Inspect subcommand tests

#[test]
fn inspect_complete_manifest_succeeds() {
    let mut cmd = Command::cargo_bin("iiifgen").unwrap();
    cmd.args(["inspect", "tests/fixtures/sample_valid.json"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("missing recommended"));
}

#[test]
fn inspect_incomplete_manifest_fails() {
    let mut cmd = Command::cargo_bin("iiifgen").unwrap();
    cmd.args(["inspect", "tests/fixtures/sample_incomplete.json"]);
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("\"Required\""));
}

#[test]
fn inspect_names_the_missing_fields() {
    let mut cmd = Command::cargo_bin("iiifgen").unwrap();
    cmd.args(["inspect", "tests/fixtures/sample_incomplete.json"]);
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("label"))
        .stdout(predicates::str::contains("items"));
}

#[test]
fn inspect_json_output_format() {
    let mut cmd = Command::cargo_bin("iiifgen").unwrap();
    cmd.args([
        "inspect",
        "tests/fixtures/sample_valid.json",
        "--output",
        "json",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("\"missing_required\": 0"));
}

#[test]
fn inspect_missing_file_reports_io_error() {
    let mut cmd = Command::cargo_bin("iiifgen").unwrap();
    cmd.args(["inspect", "tests/fixtures/does_not_exist.json"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("error"));
}
