use std::fs;
use std::path::PathBuf;

use mab_core::{extract_file, render, write_file, ColumnProfile};
use pretty_assertions::assert_eq;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn renders_detected_mappings_into_full_csv() {
    let out = extract_file(&fixture("fixtures/mab-with-mappings.txt")).expect("extract");
    let csv = render(&out.records, &out.detected_mappings, ColumnProfile::Full);
    let rows: Vec<&str> = csv.lines().skip(1).collect();

    assert_eq!(
        rows,
        vec![
            "00:1e:0b:41:7a:fd,Wired Production,,,,,Allow,,No,,No",
            "00:50:56:a3:1b:2c,Guest,,,,,Allow,,No,,No",
            "00:d0:2b:11:4e:5f,Voice,,,,,Allow,,No,,No",
            "f8:b1:56:aa:00:01,,,,,,Allow,,No,,No",
            "a4:bb:6d:10:22:cd,Wired Production,,,,,Allow,,No,,No",
        ]
    );
}

#[test]
fn write_file_appends_single_newline() {
    let out = extract_file(&fixture("fixtures/mab-plain.txt")).expect("extract");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nile_migration.csv");

    write_file(&out.records, &out.detected_mappings, ColumnProfile::Base, &path)
        .expect("write csv");

    let written = fs::read_to_string(&path).expect("read csv");
    let expected = render(&out.records, &out.detected_mappings, ColumnProfile::Base);
    assert_eq!(written, format!("{expected}\n"));
    assert_eq!(written.lines().count(), 3);
}
