#![forbid(unsafe_code)]
use chrono::{TimeZone, Utc};
use shiftboard::io::{
    export_board_json, export_entries_csv, import_shifts_csv, read_shifts_csv, write_entries_csv,
};
use shiftboard::model::{Board, Shift, ShiftDateEntry, ShiftId, ShiftType};
use shiftboard::service::{ServiceError, ServiceOptions, ShiftService};
use shiftboard::storage::{JsonStorage, Storage};
use tempfile::tempdir;

fn sample_board() -> Board {
    let id = ShiftId::new("s-1");
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let entry = |date: &str, start: &str, end: &str, shift_type| ShiftDateEntry {
        shift_id: id.clone(),
        date: date.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        shift_type,
    };
    Board {
        shifts: vec![Shift {
            id: id.clone(),
            title: "Matin".into(),
            description: Some("Consultations du matin".into()),
            price: 120.5,
            dates: vec![
                entry("20-03-2024", "09:00", "12:00", ShiftType::Consultation),
                entry("21-03-2024", "13:00", "14:00", ShiftType::Telephone),
            ],
            created_at: at,
            updated_at: at,
        }],
    }
}

#[test]
fn missing_file_loads_empty_board() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("shifts.json")).unwrap();
    assert!(storage.load().unwrap().shifts.is_empty());
}

#[test]
fn save_and_load_roundtrip() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("shifts.json")).unwrap();
    let board = sample_board();
    storage.save(&board).unwrap();
    assert_eq!(storage.load().unwrap(), board);

    let raw = std::fs::read_to_string(storage.path()).unwrap();
    assert!(raw.contains("\"startTime\": \"09:00\""));
    assert!(raw.contains("\"type\": \"Consultation\""));
}

#[test]
fn corrupt_file_is_a_storage_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shifts.json");
    std::fs::write(&path, "{ not json").unwrap();
    let storage = JsonStorage::open(&path).unwrap();

    let err = ShiftService::open(&storage, ServiceOptions::default()).unwrap_err();
    assert!(matches!(err, ServiceError::Storage(_)));
    assert_eq!(err.status(), 500);
}

#[test]
fn entries_csv_export() {
    let mut out = Vec::new();
    write_entries_csv(&mut out, &sample_board()).unwrap();
    let out = String::from_utf8(out).unwrap();
    insta::assert_snapshot!(out.trim_end(), @r"
shift_id,title,date,start_time,end_time,type,price
s-1,Matin,20-03-2024,09:00,12:00,Consultation,120.5
s-1,Matin,21-03-2024,13:00,14:00,Telephone,120.5
");
}

#[test]
fn entries_csv_export_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("entries.csv");
    export_entries_csv(&path, &sample_board()).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn csv_import_groups_rows_by_title() {
    let data = "\
title,description,price,date,start_time,end_time,type
Matin,,100,20-03-2024,09:00,12:00,Consultation
Matin,,100,21-03-2024,09:00,12:00,Consultation
Nuit,Garde SAMU,250,20-03-2024,20:00,23:00,ambulance
";
    let requests = read_shifts_csv(data.as_bytes()).unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].dates.len(), 2);
    assert_eq!(requests[0].shift.description, None);
    assert_eq!(requests[1].shift.description.as_deref(), Some("Garde SAMU"));
    assert_eq!(requests[1].dates[0].shift_type, ShiftType::Ambulance);

    let mut svc = ShiftService::default();
    for request in requests {
        svc.create(request).unwrap();
    }
    assert_eq!(svc.board().entries().count(), 3);
}

#[test]
fn csv_import_rejects_unknown_type() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("in.csv");
    std::fs::write(
        &path,
        "title,description,price,date,start_time,end_time,type\nA,,1,20-03-2024,09:00,10:00,Radio\n",
    )
    .unwrap();
    let err = import_shifts_csv(&path).unwrap_err();
    assert!(format!("{err:#}").contains("invalid type"));
}

#[test]
fn board_json_export_reloads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("export.json");
    let board = sample_board();
    export_board_json(&path, &board).unwrap();

    let reloaded = JsonStorage::open(&path).unwrap().load().unwrap();
    assert_eq!(reloaded, board);
}
