//! Integration tests for codedrop-commands crate.
//!
//! These tests exercise the command data and dispense path against a real
//! inventory in a temporary directory; nothing talks to Discord.

use codedrop_commands::{
    add_reply, delete_reply, dispense_reply, parse_amount, purge_reply, purge_used_reply, replies, upload_reply, Data,
    DispatchTable, DispenseReply,
};
use codedrop_common::test_utils::{create_temp_dir, init_test_logging, write_files, zip_fixture};
use codedrop_common::{DropError, SetName};
use codedrop_config::Config;
use codedrop_store::{ArchiveSource, Inventory, MockArchiveSource};
use std::sync::Arc;
use tempfile::TempDir;

fn name(raw: &str) -> SetName {
    SetName::parse(raw).unwrap()
}

fn test_data(archives: MockArchiveSource) -> (TempDir, Data) {
    init_test_logging();
    let dir = create_temp_dir();
    let mut config = Config::default();
    config.bot_token = "test-token".to_string();
    config.storage.base_dir = dir.path().join("codes");
    config.storage.registry_file = dir.path().join("commands.json");

    let inventory = Inventory::open(&config.storage.base_dir, &config.storage.registry_file)
        .unwrap()
        .with_seed(1);
    let data = Data {
        config: Arc::new(config),
        inventory: Arc::new(inventory),
        table: Arc::new(DispatchTable::new()),
        archives: Arc::new(archives) as Arc<dyn ArchiveSource>,
    };
    (dir, data)
}

#[test]
fn test_admin_command_names_are_reserved() {
    let names: Vec<String> = [
        codedrop_commands::admin::add(),
        codedrop_commands::admin::upload(),
        codedrop_commands::admin::delete(),
        codedrop_commands::admin::purge(),
        codedrop_commands::admin::purge_used(),
        codedrop_commands::stats::stats(),
    ]
    .into_iter()
    .map(|command| command.name)
    .collect();

    assert_eq!(names, vec!["add", "upload", "delete", "purge", "purge_used", "stats"]);
    for reserved in names {
        assert!(SetName::parse(&reserved).is_err(), "`{reserved}` must not be a set name");
    }
}

#[tokio::test]
async fn test_refresh_table_follows_registry() {
    let (_dir, data) = test_data(MockArchiveSource::new());
    assert_eq!(data.refresh_table(), 0);

    data.store(|inventory| inventory.add_set(&SetName::parse("nike")?))
        .await
        .unwrap();
    assert_eq!(data.refresh_table(), 1);
    assert_eq!(data.table.lookup("nike"), Some(name("nike")));

    data.store(|inventory| inventory.delete_set(&SetName::parse("nike")?))
        .await
        .unwrap();
    data.refresh_table();
    assert!(data.table.lookup("nike").is_none());
}

#[tokio::test]
async fn test_dispense_reply_sends_codes() {
    let (_dir, data) = test_data(MockArchiveSource::new());
    let nike = name("nike");
    data.inventory.add_set(&nike).unwrap();
    write_files(&data.inventory.set_dir(&nike), &["a.png", "b.png", "c.png"]);

    let reply = dispense_reply(&data, &nike, "alice", Ok(Some(2))).await.unwrap();

    let (content, files) = match reply {
        DispenseReply::Codes { content, files } => (content, files),
        DispenseReply::Notice(notice) => panic!("expected codes, got notice {notice:?}"),
    };
    assert_eq!(content, "📦 `alice` used `nike` for 2 code(s):");
    assert_eq!(files.len(), 2);
    assert_eq!(data.inventory.list_available(&nike).unwrap().len(), 1);
}

#[tokio::test]
async fn test_dispense_reply_default_amount_and_clamp() {
    let (_dir, data) = test_data(MockArchiveSource::new());
    let nike = name("nike");
    data.inventory.add_set(&nike).unwrap();
    let files: Vec<String> = (0..30).map(|i| format!("{i}.gif")).collect();
    let refs: Vec<&str> = files.iter().map(String::as_str).collect();
    write_files(&data.inventory.set_dir(&nike), &refs);

    let DispenseReply::Codes { files: default, .. } =
        dispense_reply(&data, &nike, "bob", Ok(None)).await.unwrap()
    else {
        panic!("expected codes");
    };
    assert_eq!(default.len(), 5);

    let DispenseReply::Codes { files: clamped, .. } =
        dispense_reply(&data, &nike, "bob", Ok(Some(500))).await.unwrap()
    else {
        panic!("expected codes");
    };
    assert_eq!(clamped.len(), 10);
}

#[tokio::test]
async fn test_dispense_reply_notices() {
    let (_dir, data) = test_data(MockArchiveSource::new());
    let nike = name("nike");
    data.inventory.add_set(&nike).unwrap();

    assert_eq!(
        dispense_reply(&data, &nike, "carol", Ok(Some(1))).await.unwrap(),
        DispenseReply::Notice("No more codes left in `nike`.".to_string())
    );
    assert_eq!(
        dispense_reply(&data, &nike, "carol", Ok(Some(0))).await.unwrap(),
        DispenseReply::Notice("Amount must be at least 1.".to_string())
    );
    assert_eq!(
        dispense_reply(&data, &nike, "carol", parse_amount(Some("lots"))).await.unwrap(),
        DispenseReply::Notice("Amount must be a whole number.".to_string())
    );
}

const ZIP_URL: &str = "https://cdn.example/codes.zip";

/// Archive source that must not be reached.
fn unused_source() -> MockArchiveSource {
    let mut archives = MockArchiveSource::new();
    archives.expect_fetch().never();
    archives
}

/// Archive source that serves `bytes` once for [`ZIP_URL`].
fn serving(bytes: Vec<u8>) -> MockArchiveSource {
    let mut archives = MockArchiveSource::new();
    archives
        .expect_fetch()
        .withf(|url| url == ZIP_URL)
        .times(1)
        .returning(move |_| Ok(bytes.clone()));
    archives
}

fn user_text(outcome: Result<String, DropError>) -> String {
    let err = outcome.unwrap_err();
    assert!(err.is_user_facing(), "unexpected internal error {err:?}");
    replies::error_message(&err)
}

#[tokio::test]
async fn test_upload_requires_attachment() {
    let (_dir, data) = test_data(unused_source());
    data.inventory.add_set(&name("nike")).unwrap();

    let text = user_text(upload_reply(&data, "nike", None).await);
    assert_eq!(text, replies::MISSING_ATTACHMENT);
}

#[tokio::test]
async fn test_upload_to_unknown_set_hints_add() {
    let (_dir, data) = test_data(unused_source());

    let text = user_text(upload_reply(&data, "nike", Some(("codes.zip", ZIP_URL))).await);
    assert_eq!(text, "The set `nike` does not exist. Use `/add nike` first.");
}

#[tokio::test]
async fn test_upload_rejects_non_zip_name() {
    let (_dir, data) = test_data(unused_source());
    data.inventory.add_set(&name("nike")).unwrap();

    let text = user_text(upload_reply(&data, "nike", Some(("codes.rar", ZIP_URL))).await);
    assert_eq!(text, replies::NOT_A_ZIP);
}

#[tokio::test]
async fn test_upload_reports_download_failure() {
    let mut archives = MockArchiveSource::new();
    archives
        .expect_fetch()
        .times(1)
        .returning(|_| Err(DropError::transport_with_status("Failed to download the zip file (HTTP 404)", 404)));
    let (_dir, data) = test_data(archives);
    let nike = name("nike");
    data.inventory.add_set(&nike).unwrap();

    let text = user_text(upload_reply(&data, "nike", Some(("codes.zip", ZIP_URL))).await);
    assert_eq!(text, "Failed to download the zip file (HTTP 404)");
    assert!(data.inventory.list_available(&nike).unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_reports_corrupt_archive() {
    let (_dir, data) = test_data(serving(b"definitely not a zip".to_vec()));
    let nike = name("nike");
    data.inventory.add_set(&nike).unwrap();

    let text = user_text(upload_reply(&data, "nike", Some(("codes.zip", ZIP_URL))).await);
    assert!(text.starts_with("❌ That file is not a valid ZIP"), "{text}");
    assert!(data.inventory.list_available(&nike).unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_ingests_images() {
    let bytes = zip_fixture(&[("codes/a.png", b"a"), ("codes/b.jpg", b"b"), ("readme.txt", b"r")]);
    let (_dir, data) = test_data(serving(bytes));
    let nike = name("nike");
    data.inventory.add_set(&nike).unwrap();

    let text = upload_reply(&data, "Nike", Some(("CODES.ZIP", ZIP_URL))).await.unwrap();

    assert_eq!(text, "✅ Uploaded `2` code(s) to `nike`.");
    let mut available = data.inventory.list_available(&nike).unwrap();
    available.sort();
    assert_eq!(available, vec!["a.png".to_string(), "b.jpg".to_string()]);
}

#[tokio::test]
async fn test_add_and_delete_update_dispatch_table() {
    let (_dir, data) = test_data(unused_source());

    assert_eq!(add_reply(&data, "nike").await.unwrap(), "Added new code set `nike` with command `/nike`.");
    assert_eq!(data.table.lookup("nike"), Some(name("nike")));
    assert_eq!(user_text(add_reply(&data, "nike").await), "`nike` already exists.");

    assert_eq!(delete_reply(&data, "nike").await.unwrap(), "Deleted `nike` and its files.");
    assert!(data.table.lookup("nike").is_none());
    assert!(!data.inventory.registry().contains(&name("nike")));
    assert_eq!(user_text(delete_reply(&data, "nike").await), "`nike` doesn't exist.");
}

#[tokio::test]
async fn test_purge_replies_count_removed_codes() {
    let (_dir, data) = test_data(unused_source());
    let nike = name("nike");
    add_reply(&data, "nike").await.unwrap();
    write_files(&data.inventory.set_dir(&nike), &["a.png", "b.png"]);
    write_files(&data.inventory.used_dir(&nike), &["c.png"]);

    assert_eq!(purge_reply(&data, "nike").await.unwrap(), "Purged `2` unsent code(s) from `nike`.");
    assert_eq!(purge_used_reply(&data).await.unwrap(), "Purged `1` used code(s) from all sets.");
    assert_eq!(user_text(purge_reply(&data, "adidas").await), "`adidas` doesn't exist.");
}
