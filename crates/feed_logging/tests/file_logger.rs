use std::fs;

use feed_logging::{feed_info, initialize, LogDestination};
use log::LevelFilter;

#[test]
fn file_destination_receives_messages_and_rejects_second_init() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo_feed.log");

    assert!(initialize(LogDestination::File(path.clone()), LevelFilter::Info));
    feed_info!("accepted photo title={}", "sunset");

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("accepted photo title=sunset"));

    // The global logger is already installed for this process.
    assert!(!initialize(LogDestination::Terminal, LevelFilter::Info));
}

#[test]
fn missing_log_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("photo_feed.log");

    assert!(!initialize(LogDestination::File(path), LevelFilter::Info));
}
