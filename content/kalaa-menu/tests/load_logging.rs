//! Log output of the menu loaders
//!
//! Runs in its own test binary so the capturing logger is the global one.

use std::path::PathBuf;
use std::sync::Mutex;

use kalaa_menu::{MenuData, MenuError};
use log::{Level, LevelFilter, Log, Metadata, Record};
use pretty_assertions::assert_eq;

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

fn take_warnings() -> Vec<String> {
    let mut records = LOGGER.records.lock().expect("logger lock");
    records
        .drain(..)
        .filter(|(level, _)| *level == Level::Warn)
        .map(|(_, message)| message)
        .collect()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn test_each_load_reports_issues_once() {
    log::set_logger(&LOGGER).expect("only logger in this binary");
    log::set_max_level(LevelFilter::Trace);

    // Strict loading returns the issues instead of warning about them
    match MenuData::load_strict(fixture("broken.json")) {
        Err(MenuError::Invalid(issues)) => assert_eq!(issues.len(), 3),
        other => panic!("expected invalid menu, got {other:?}"),
    }
    assert_eq!(take_warnings(), Vec::<String>::new());

    MenuData::load(fixture("broken.json")).expect("lenient load succeeds");
    let warnings = take_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].ends_with("has 3 validation issue(s)"));

    MenuData::load_strict(fixture("menu.json")).expect("clean menu loads");
    assert_eq!(take_warnings(), Vec::<String>::new());
}
