// Integration tests for the teamkpi CLI: argument contract, exit codes
// and error surfaces, driven through the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn teamkpi() -> Command {
    Command::cargo_bin("teamkpi").expect("binary should compile")
}

fn empty_workspace() -> TempDir {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("team.json"),
        r#"{"developers": [], "tickets": [], "bugs": []}"#,
    )
    .expect("team data should write");
    dir
}

#[test]
fn cli_version_flag() {
    teamkpi()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("teamkpi"));
}

#[test]
fn cli_help_flag() {
    teamkpi()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("KPI tracking"));
}

#[test]
fn report_requires_developer_month_and_year() {
    teamkpi()
        .args(["report", "/tmp/ws"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn report_rejects_missing_workspace() {
    let dir = TempDir::new().expect("temp dir should be created");
    teamkpi()
        .args(["report", dir.path().to_str().expect("utf-8 path")])
        .args(["--developer", "dev-1", "--month", "3", "--year", "2025"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("dataset not found"));
}

#[test]
fn report_rejects_month_out_of_range() {
    let ws = empty_workspace();
    teamkpi()
        .args(["report", ws.path().to_str().expect("utf-8 path")])
        .args(["--developer", "dev-1", "--month", "13", "--year", "2025"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid period"));
}

#[test]
fn report_rejects_unknown_developer() {
    let ws = empty_workspace();
    teamkpi()
        .args(["report", ws.path().to_str().expect("utf-8 path")])
        .args(["--developer", "ghost", "--month", "3", "--year", "2025"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("developer not found: ghost"));
}

#[test]
fn report_warns_when_config_missing() {
    let ws = empty_workspace();
    fs::write(
        ws.path().join("team.json"),
        r#"{
            "developers": [{
                "id": "dev-1", "name": "Ada", "email": "ada@example.com",
                "role": "mid", "team": null, "startDate": "2024-01-01T00:00:00Z",
                "isActive": true,
                "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"
            }],
            "tickets": [], "bugs": []
        }"#,
    )
    .expect("team data should write");

    teamkpi()
        .args(["report", ws.path().to_str().expect("utf-8 path")])
        .args(["--developer", "dev-1", "--month", "3", "--year", "2025"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no kpi.toml found"))
        .stdout(predicate::str::contains("# KPI Report"));
}

#[test]
fn invalid_config_is_a_runtime_failure() {
    let ws = empty_workspace();
    fs::write(
        ws.path().join("kpi.toml"),
        r#"
[scoring]
delivery_weight = 0.9
quality_weight = 0.9
"#,
    )
    .expect("config should write");

    teamkpi()
        .args(["report", ws.path().to_str().expect("utf-8 path")])
        .args(["--developer", "dev-1", "--month", "3", "--year", "2025"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("must sum to 1.0"));
}

#[test]
fn team_without_contributors_is_no_data_not_an_error() {
    let ws = empty_workspace();
    fs::write(ws.path().join("kpi.toml"), "").expect("config should write");
    teamkpi()
        .args(["team", ws.path().to_str().expect("utf-8 path")])
        .args(["--month", "3", "--year", "2025"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no data"));
}

#[test]
fn ticket_status_rejects_off_graph_transition() {
    let ws = empty_workspace();
    fs::write(
        ws.path().join("team.json"),
        r#"{
            "developers": [],
            "tickets": [{
                "id": "t-1", "title": "Parser cleanup", "developerId": "dev-1",
                "assignedDate": "2025-03-01T09:00:00Z", "dueDate": "2025-03-10T17:00:00Z",
                "status": "assigned", "complexity": "medium",
                "createdAt": "2025-03-01T09:00:00Z", "updatedAt": "2025-03-01T09:00:00Z"
            }],
            "bugs": []
        }"#,
    )
    .expect("team data should write");

    teamkpi()
        .args(["ticket", ws.path().to_str().expect("utf-8 path")])
        .args(["status", "--id", "t-1", "--to", "completed"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("assigned -> completed"));
}

#[test]
fn history_of_unknown_developer_is_empty_not_an_error() {
    let ws = empty_workspace();
    teamkpi()
        .args(["history", ws.path().to_str().expect("utf-8 path")])
        .args(["--developer", "dev-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no stored snapshots"));
}
