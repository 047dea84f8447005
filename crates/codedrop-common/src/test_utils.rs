//! Test utilities and shared test helpers for codedrop.
//!
//! This module provides fixtures and helper functions that can be used
//! across all crates in the workspace for unit and integration testing.

use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write each named file into `dir` with a small distinct payload.
pub fn write_files(dir: &Path, names: &[&str]) {
    std::fs::create_dir_all(dir).expect("Failed to create fixture directory");
    for name in names {
        std::fs::write(dir.join(name), format!("payload:{name}")).expect("Failed to write fixture file");
    }
}

/// Build an in-memory ZIP archive. Entry names ending in `/` become
/// directory entries.
pub fn zip_fixture(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();

    for (name, data) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, options)
                .expect("Failed to add directory entry");
        } else {
            writer.start_file(*name, options).expect("Failed to start entry");
            writer.write_all(data).expect("Failed to write entry");
        }
    }

    writer.finish().expect("Failed to finish archive").into_inner()
}

/// Property-based testing utilities using proptest.
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for generating names that pass set-name validation.
    pub fn valid_set_name_strategy() -> impl Strategy<Value = String> {
        r"[a-z0-9][a-z0-9_-]{0,31}"
            .prop_filter("reserved names are rejected", |s| {
                !crate::RESERVED_NAMES.contains(&s.as_str())
            })
    }

    /// Strategy for generating archive entry paths with traversal segments.
    pub fn hostile_entry_path_strategy() -> impl Strategy<Value = String> {
        (
            prop::collection::vec(prop_oneof![Just(".."), Just("."), Just("dir"), Just("")], 0..4),
            r"[a-zA-Z0-9_]{1,12}\.png",
        )
            .prop_map(|(segments, file)| {
                let mut path = segments.join("/");
                if !path.is_empty() {
                    path.push('/');
                }
                path.push_str(&file);
                path
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_write_files_creates_payloads() {
        let dir = create_temp_dir();
        write_files(dir.path(), &["a.png", "b.txt"]);

        assert_eq!(std::fs::read_to_string(dir.path().join("a.png")).unwrap(), "payload:a.png");
        assert!(dir.path().join("b.txt").is_file());
    }

    #[test]
    fn test_zip_fixture_is_readable() {
        let bytes = zip_fixture(&[("folder/", b""), ("folder/a.png", b"png-bytes")]);
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert_eq!(archive.len(), 2);
        let mut entry = archive.by_name("folder/a.png").unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "png-bytes");
    }
}
