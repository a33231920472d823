//! End-to-end behavior of the table with an on-disk preference store.

use livetab::config::TableConfig;
use livetab::model::{Snapshot, Value};
use livetab::provider::{DemoProvider, SnapshotProvider, parse_lines};
use livetab::store::FileStore;
use livetab::table::{LiveTable, RowAction, TableError};

fn config() -> TableConfig {
    TableConfig {
        base_hidden: vec!["lat".to_string(), "session_id".to_string()],
        important_order: vec!["RPM".to_string(), "CLT_C".to_string()],
        ..TableConfig::default()
    }
}

fn snap(pairs: &[(&str, Value)]) -> Snapshot {
    pairs.iter().cloned().collect()
}

#[test]
fn hidden_keys_survive_reconstruction() {
    let dir = tempfile::tempdir().unwrap();
    let first = snap(&[
        ("RPM", Value::Number(5000.0)),
        ("Gear", Value::Number(3.0)),
        ("CLT_C", Value::Number(90.0)),
    ]);

    {
        let mut table = LiveTable::new(&config(), Box::new(FileStore::new(dir.path()))).unwrap();
        table.update(first.clone());
        table.hide("Gear").unwrap();
        assert_eq!(table.visible_keys(), vec!["CLT_C", "RPM"]);
    }

    let mut table = LiveTable::new(&config(), Box::new(FileStore::new(dir.path()))).unwrap();
    table.update(first);
    assert!(table.is_user_hidden("Gear"));
    assert_eq!(table.visible_keys(), vec!["CLT_C", "RPM"]);
    assert_eq!(table.row_action("Gear"), RowAction::Unhide);

    table.unhide("Gear").unwrap();
    let table = LiveTable::new(&config(), Box::new(FileStore::new(dir.path()))).unwrap();
    assert!(table.user_hidden().is_empty());
}

#[test]
fn corrupt_preference_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let key = config().persistence_key;
    std::fs::write(dir.path().join(format!("{}.json", key)), "{not json").unwrap();

    let table = LiveTable::new(&config(), Box::new(FileStore::new(dir.path()))).unwrap();
    assert!(table.user_hidden().is_empty());
}

#[test]
fn pin_and_default_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut table = LiveTable::new(&config(), Box::new(FileStore::new(dir.path()))).unwrap();
    table.update(snap(&[
        ("Gear", Value::Number(3.0)),
        ("CLT_C", Value::Number(90.0)),
        ("RPM", Value::Number(5000.0)),
    ]));
    assert_eq!(table.visible_keys(), vec!["CLT_C", "Gear", "RPM"]);
    table.set_pin(true);
    assert_eq!(table.visible_keys(), vec!["RPM", "CLT_C", "Gear"]);
}

#[test]
fn csv_export_quotes_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut table = LiveTable::new(&config(), Box::new(FileStore::new(dir.path()))).unwrap();
    table.update(snap(&[
        ("RPM", Value::Number(5000.0)),
        ("Note", Value::from("a\"b")),
    ]));
    assert_eq!(
        table.export_csv(),
        "Parameter,Value\n\"Note\",\"a\"\"b\"\n\"RPM\",\"5000\""
    );
}

#[test]
fn json_lines_feed_without_growth() {
    let dir = tempfile::tempdir().unwrap();
    let mut table = LiveTable::new(&config(), Box::new(FileStore::new(dir.path()))).unwrap();
    let input = "{\"RPM\": 900, \"CLT_C\": 80.12345}\n\
                 not json\n\
                 {\"RPM\": 950, \"CLT_C\": 80.12345, \"Extra\": 1}\n";

    let mut errors = 0;
    for item in parse_lines(std::io::Cursor::new(input)) {
        match item {
            Ok(snapshot) => {
                table.update(snapshot);
            }
            Err(_) => errors += 1,
        }
    }
    assert_eq!(errors, 1);
    assert_eq!(table.row_count(), 2);
    assert!(table.row("Extra").is_none());
    assert_eq!(table.row("CLT_C").unwrap().display_text(), "80.123");
    assert_eq!(table.row("RPM").unwrap().display_text(), "950");
    assert_eq!(table.row("RPM").unwrap().previous, Some(Value::Number(900.0)));
}

#[test]
fn demo_feed_respects_base_hidden_and_freeze() {
    let dir = tempfile::tempdir().unwrap();
    let mut table = LiveTable::new(&config(), Box::new(FileStore::new(dir.path()))).unwrap();
    let mut demo = DemoProvider::new();

    let first = demo.advance().cloned().unwrap();
    table.update(first);
    let keys = table.visible_keys();
    assert!(keys.contains(&"RPM"));
    assert!(!keys.contains(&"lat"));
    assert!(!keys.contains(&"session_id"));

    table.set_freeze(true);
    let before = table.row("RPM").unwrap().value.clone();
    let outcome = table.update(demo.advance().cloned().unwrap());
    assert!(outcome.frozen);
    assert_eq!(table.row("RPM").unwrap().value, before);
}

#[test]
fn export_json_needs_a_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let table = LiveTable::new(&config(), Box::new(FileStore::new(dir.path()))).unwrap();
    assert_eq!(table.export_json(), Err(TableError::NoSnapshot));
}
