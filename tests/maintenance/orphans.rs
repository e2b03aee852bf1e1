//! Dictionary deletion and orphaned-bucket repair.

use super::common::{core_store, import, record, uncached_matcher};
use lexmatch::{Bucket, BucketKey, EntryStore, Importer, KeyValueStore, MemoryStore};
use serde_json::json;
use std::sync::Arc;

fn importer(store: &MemoryStore) -> (Importer, EntryStore) {
    let entries = EntryStore::new(Arc::new(store.clone()), "bucket");
    (Importer::new(entries.clone()), entries)
}

#[tokio::test]
async fn deleting_a_dictionary_leaves_no_buckets_or_orphans() {
    let store = core_store().await;
    let (importer, entries) = importer(&store);

    let deleted = importer.delete_dictionary("D").await.unwrap();
    assert!(deleted > 0);
    assert!(importer.find_orphaned_buckets().await.unwrap().is_empty());
    assert!(entries.list_all_bucket_keys().await.unwrap().is_empty());
    assert!(!store
        .keys()
        .await
        .unwrap()
        .iter()
        .any(|key| key.starts_with("bucket_D_")));
    assert!(uncached_matcher(&store).lookup("猫").await.unwrap().is_empty());
}

#[tokio::test]
async fn deletion_spares_dictionaries_sharing_a_name_prefix() {
    let store = core_store().await;
    import(Arc::new(store.clone()), "D_extra", &json!([record("猫", "ねこ", 1)])).await;
    let (importer, entries) = importer(&store);

    importer.delete_dictionary("D").await.unwrap();

    let remaining: Vec<BucketKey> = entries.list_all_bucket_keys().await.unwrap();
    assert_eq!(
        remaining,
        vec![BucketKey::new("D_extra", 'ね'), BucketKey::new("D_extra", '猫')]
    );
    let results = uncached_matcher(&store).lookup("猫").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].dictionary, "D_extra");
}

#[tokio::test]
async fn cleanup_removes_only_unregistered_buckets() {
    let store = core_store().await;
    let (importer, entries) = importer(&store);
    let before = entries.list_all_bucket_keys().await.unwrap().len();

    // Left behind by an import that failed before registering
    entries.put_bucket("Lost", 'a', &Bucket::new()).await.unwrap();
    entries.put_bucket("Lost", 'b', &Bucket::new()).await.unwrap();

    let orphans = importer.find_orphaned_buckets().await.unwrap();
    assert_eq!(orphans.len(), 2);
    assert!(orphans.iter().all(|key| key.dictionary == "Lost"));

    let removed = importer.cleanup_orphaned_buckets().await.unwrap();
    assert_eq!(removed, orphans);
    assert_eq!(entries.list_all_bucket_keys().await.unwrap().len(), before);
    assert!(importer.cleanup_orphaned_buckets().await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_an_unknown_dictionary_is_harmless() {
    let store = core_store().await;
    let (importer, entries) = importer(&store);
    assert_eq!(importer.delete_dictionary("Nope").await.unwrap(), 0);
    assert!(entries.list_dictionaries().await.unwrap().contains("D"));
}
