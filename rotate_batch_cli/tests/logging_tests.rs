//! Log output of a batch run without progress bars
//!
//! Kept in its own test binary because the capturing logger is process-wide.

use log::{Level, LevelFilter, Log, Metadata, Record};
use rotate_batch_cli::config::{AppConfig, CliOverrides};
use rotate_batch_cli::orchestrators::RotateOrchestrator;
use rotate_batch_test_utils::MockImaging;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().starts_with("rotate_batch") {
            RECORDS
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

fn count_containing(needle: &str) -> usize {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, message)| message.contains(needle))
        .count()
}

#[tokio::test]
async fn test_each_event_is_logged_once_without_progress_bars() {
    log::set_logger(&CapturingLogger).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("a.png"), MockImaging::image_bytes("a")).unwrap();
    fs::write(input.path().join("b.png"), b"garbage").unwrap();

    let mut config = AppConfig::default();
    config.apply_cli_overrides(&CliOverrides {
        no_progress: true,
        ..CliOverrides::default()
    });
    let orchestrator = RotateOrchestrator::with_backend(config, MockImaging::new());
    assert!(!orchestrator.shows_progress());

    let result = orchestrator.run(input.path(), output.path()).await.unwrap();
    assert_eq!(result.successful, 1);
    assert_eq!(result.failed, 1);

    assert_eq!(count_containing("Successfully rotated a.png"), 1);
    assert_eq!(count_containing("Failed to rotate b.png"), 1);
    assert_eq!(count_containing("Saved rotated image"), 180);
    assert_eq!(count_containing("Found 2 image file(s)"), 1);
}
