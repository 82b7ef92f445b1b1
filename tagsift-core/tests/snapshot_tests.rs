// Tests for snapshot persistence

use std::collections::BTreeMap;

use tagsift_core::snapshot::{
    SCRIPT_URLS_SNAPSHOT, SiteFileIndex, SiteScriptIndex, UTAG_FILES_SNAPSHOT, write_script_urls,
    write_utag_files,
};

#[test]
fn utag_files_snapshot_round_trips() {
    let dir = tempfile::tempdir().unwrap();

    let mut index = SiteFileIndex::new();
    index.insert(
        "https://example.com".to_string(),
        vec!["https://example.com/utag.js".to_string()],
    );

    write_utag_files(dir.path(), &index).unwrap();

    let json = std::fs::read_to_string(dir.path().join(UTAG_FILES_SNAPSHOT)).unwrap();
    let parsed: SiteFileIndex = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, index);
}

#[test]
fn script_urls_snapshot_is_pretty_printed() {
    let dir = tempfile::tempdir().unwrap();

    let mut index = SiteScriptIndex::new();
    index.insert(
        "https://example.com".to_string(),
        BTreeMap::from([(
            "5".to_string(),
            vec!["https://scripts.example/v2".to_string()],
        )]),
    );

    write_script_urls(dir.path(), &index).unwrap();

    let json = std::fs::read_to_string(dir.path().join(SCRIPT_URLS_SNAPSHOT)).unwrap();
    // Pretty-printed output spans multiple indented lines.
    assert!(json.lines().count() > 1);
    assert!(json.contains("  \"https://example.com\""));

    let parsed: SiteScriptIndex = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, index);
}
