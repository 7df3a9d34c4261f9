//! Logger setup from the `log` config section.
//!
//! Defaults to `./photo_feed.log`, since the terminal is taken by the grid.

use feed_logging::LogDestination;

use super::config::{LogConfig, LogTarget};

pub fn initialize(config: &LogConfig) {
    let destination = match config.destination {
        LogTarget::File => LogDestination::File(config.file.clone()),
        LogTarget::Terminal => LogDestination::Terminal,
        LogTarget::Both => LogDestination::Both(config.file.clone()),
    };
    if !feed_logging::initialize(destination, config.level.filter()) {
        eprintln!("Warning: logging disabled for this run");
    }
}
