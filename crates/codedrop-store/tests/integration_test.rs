//! Integration tests for codedrop-store crate.
//!
//! These tests drive the inventory through its public API the way the
//! command layer does.

use async_trait::async_trait;
use codedrop_common::test_utils::{create_temp_dir, init_test_logging, write_files, zip_fixture};
use codedrop_common::{DropError, SetName};
use codedrop_store::{registry, ArchiveSource, Inventory, SetStats};
use std::fs;
use std::sync::Arc;
use std::thread;

fn name(raw: &str) -> SetName {
    SetName::parse(raw).unwrap()
}

/// Serves a fixed archive regardless of URL.
struct FixtureSource(Vec<u8>);

#[async_trait]
impl ArchiveSource for FixtureSource {
    async fn fetch(&self, _url: &str) -> codedrop_common::Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_end_to_end_scenario() {
    init_test_logging();
    let dir = create_temp_dir();
    let registry_file = dir.path().join("commands.json");
    fs::write(&registry_file, "[]").unwrap();

    let inventory = Inventory::open(dir.path().join("codes"), &registry_file).unwrap();
    let nike = name("nike");
    inventory.add_set(&nike).unwrap();
    assert_eq!(registry::load(&registry_file).unwrap(), vec![nike.clone()]);

    write_files(&inventory.set_dir(&nike), &["a.png", "b.jpg"]);

    let codes = inventory.dispense(&nike, 5).unwrap();
    assert_eq!(codes.len(), 2);
    assert_eq!(fs::read_dir(inventory.used_dir(&nike)).unwrap().count(), 2);

    assert_eq!(
        inventory.stats().unwrap(),
        vec![SetStats { name: nike.clone(), available: 0 }]
    );

    assert!(matches!(
        inventory.dispense(&nike, 1),
        Err(DropError::EmptyInventory { .. })
    ));
}

#[test]
fn test_registry_survives_reopen() {
    let dir = create_temp_dir();
    let base = dir.path().join("codes");
    let registry_file = dir.path().join("commands.json");

    {
        let inventory = Inventory::open(&base, &registry_file).unwrap();
        inventory.add_set(&name("nike")).unwrap();
        inventory.add_set(&name("adidas")).unwrap();
        inventory.delete_set(&name("nike")).unwrap();
    }

    let reopened = Inventory::open(&base, &registry_file).unwrap();
    assert_eq!(reopened.registry().names(), vec![name("adidas")]);
    assert!(!base.join("nike").exists());
}

#[test]
fn test_upload_then_dispense_everything() {
    let dir = create_temp_dir();
    let inventory = Inventory::open(dir.path().join("codes"), dir.path().join("commands.json"))
        .unwrap()
        .with_seed(42);
    let puma = name("puma");
    inventory.add_set(&puma).unwrap();

    let bytes = zip_fixture(&[
        ("batch/1.png", b"one"),
        ("batch/2.png", b"two"),
        ("batch/3.gif", b"three"),
        ("batch/notes.md", b"skip"),
    ]);
    assert_eq!(inventory.ingest_zip(&puma, &bytes).unwrap(), 3);

    let first = inventory.dispense(&puma, 2).unwrap();
    let second = inventory.dispense(&puma, 2).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);

    let mut names: Vec<_> = first.iter().chain(&second).map(|c| c.file_name.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["1.png", "2.png", "3.gif"]);

    assert_eq!(inventory.purge_used_all().unwrap(), 3);
}

#[test]
fn test_concurrent_dispense_never_duplicates() {
    let dir = create_temp_dir();
    let inventory = Arc::new(
        Inventory::open(dir.path().join("codes"), dir.path().join("commands.json")).unwrap(),
    );
    let nike = name("nike");
    inventory.add_set(&nike).unwrap();
    let files: Vec<String> = (0..40).map(|i| format!("{i}.png")).collect();
    let refs: Vec<&str> = files.iter().map(String::as_str).collect();
    write_files(&inventory.set_dir(&nike), &refs);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let inventory = Arc::clone(&inventory);
            let nike = nike.clone();
            thread::spawn(move || -> Vec<String> {
                match inventory.dispense(&nike, 5) {
                    Ok(codes) => codes.into_iter().map(|c| c.file_name).collect(),
                    Err(DropError::EmptyInventory { .. }) => Vec::new(),
                    Err(e) => panic!("unexpected error: {e}"),
                }
            })
        })
        .collect();

    let mut dispensed: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    dispensed.sort();
    let before = dispensed.len();
    dispensed.dedup();

    assert_eq!(before, 40);
    assert_eq!(dispensed.len(), 40);
    assert!(inventory.list_available(&nike).unwrap().is_empty());
}

#[tokio::test]
async fn test_archive_source_feeds_ingest() {
    let dir = create_temp_dir();
    let inventory = Inventory::open(dir.path().join("codes"), dir.path().join("commands.json")).unwrap();
    let nike = name("nike");
    inventory.add_set(&nike).unwrap();

    let source: Box<dyn ArchiveSource> = Box::new(FixtureSource(zip_fixture(&[("code.png", b"c")])));

    let bytes = source.fetch("https://cdn.example/codes.zip").await.unwrap();
    assert_eq!(inventory.ingest_zip(&nike, &bytes).unwrap(), 1);
    assert_eq!(inventory.list_available(&nike).unwrap(), vec!["code.png".to_string()]);
}
