#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn cli(board: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shiftboard-cli").unwrap();
    cmd.arg("--board").arg(board);
    cmd
}

#[test]
fn create_conflict_then_other_type() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("shifts.json");

    cli(&board)
        .args(["create", "--title", "A", "--price", "100"])
        .args(["--date", "20-03-2024 09:00 12:00 Consultation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"A\""));

    cli(&board)
        .args(["create", "--title", "B", "--price", "80"])
        .args(["--date", "20-03-2024 11:00 13:00 Consultation"])
        .assert()
        .code(5)
        .stderr(
            predicate::str::contains("409")
                .and(predicate::str::contains("20-03-2024"))
                .and(predicate::str::contains("Consultation")),
        );

    cli(&board)
        .args(["create", "--title", "C", "--price", "80"])
        .args(["--date", "20-03-2024 11:00 13:00 Telephone"])
        .assert()
        .success();

    cli(&board)
        .args(["filter-type", "--type", "Telephone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"C\"").and(predicate::str::contains("\"title\": \"A\"").not()));
}

#[test]
fn validation_and_not_found_exit_codes() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("shifts.json");

    cli(&board)
        .args(["create", "--title", "A"])
        .args(["--date", "2024-03-20 09:00 12:00 Consultation"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("dates[0].date"));

    cli(&board)
        .args(["delete", "--id", "nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("404"));

    assert!(!board.exists());
}

#[test]
fn check_overlap_and_price_range() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("shifts.json");

    cli(&board)
        .args(["--date-format", "iso", "create", "--title", "A", "--price", "30"])
        .args(["--date", "2024-03-20 09:00 12:00 Ambulance"])
        .assert()
        .success();

    cli(&board)
        .args(["--date-format", "iso", "check-overlap"])
        .args(["--date", "2024-03-20", "--start", "12:00", "--end", "14:00", "--type", "Ambulance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hasOverlap\": false"));

    cli(&board)
        .args(["--date-format", "iso", "check-overlap"])
        .args(["--date", "2024-03-20", "--start", "11:00", "--end", "14:00", "--type", "Ambulance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hasOverlap\": true"));

    cli(&board)
        .arg("price-range")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"min\": 30.0").and(predicate::str::contains("\"max\": 30.0")));
}

#[test]
fn malformed_date_arguments_are_validation_errors() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("shifts.json");

    cli(&board)
        .args(["create", "--title", "A"])
        .args(["--date", "20-03-2024 09:00 10:00 Radio"])
        .assert()
        .code(3)
        .stderr(
            predicate::str::contains("\"status\":400")
                .and(predicate::str::contains("dates[0].type")),
        );

    cli(&board)
        .args(["create", "--title", "A"])
        .args(["--date", "20-03-2024 09:00 10:00 Telephone"])
        .args(["--date", "21-03-2024 09:00"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("dates[1]"));

    assert!(!board.exists());
}

#[test]
fn invalid_json_body_is_a_validation_error() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("shifts.json");
    let body = dir.path().join("body.json");
    std::fs::write(
        &body,
        r#"{"shift":{"title":"A","price":10},"dates":[{"date":"20-03-2024","startTime":"09:00","endTime":"10:00","type":"Radio"}]}"#,
    )
    .unwrap();

    cli(&board)
        .args(["create", "--json"])
        .arg(&body)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"error\":\"validation\"").and(predicate::str::contains("body")));

    std::fs::write(&body, r#"{"dates":[]}"#).unwrap();
    cli(&board)
        .args(["create", "--json"])
        .arg(&body)
        .assert()
        .code(3);
}

#[test]
fn corrupt_board_reports_storage_cause() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("shifts.json");
    std::fs::write(&board, "{ not json").unwrap();

    cli(&board)
        .arg("list")
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("\"status\":500")
                .and(predicate::str::contains("parsing"))
                .and(predicate::str::contains("line 1")),
        );
}

#[test]
fn export_writes_json_and_csv() {
    let dir = tempdir().unwrap();
    let board = dir.path().join("shifts.json");
    let out_json = dir.path().join("out.json");
    let out_csv = dir.path().join("out.csv");

    cli(&board)
        .args(["create", "--title", "Nuit", "--price", "250"])
        .args(["--date", "20-03-2024 20:00 23:00 Ambulance"])
        .assert()
        .success();

    cli(&board)
        .arg("export")
        .arg("--out-json")
        .arg(&out_json)
        .arg("--out-csv")
        .arg(&out_csv)
        .assert()
        .success();

    let json = std::fs::read_to_string(&out_json).unwrap();
    assert!(json.contains("\"title\": \"Nuit\""));
    let csv = std::fs::read_to_string(&out_csv).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("Nuit,20-03-2024,20:00,23:00,Ambulance,250"));
}
