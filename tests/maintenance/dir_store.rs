//! The full import → lookup → delete cycle on a directory store.

use super::common::{core_lexicon, terms};
use lexmatch::{DictionaryMetadata, DirStore, EngineConfig, Importer, TermMatcher};
use std::sync::Arc;

#[tokio::test]
async fn dictionary_persists_across_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = Arc::new(DirStore::open(dir.path()).await.unwrap());
        let matcher = TermMatcher::new(store);
        Importer::new(matcher.entry_store().clone())
            .import_json(
                "JMdict",
                DictionaryMetadata::new("JMdict", "2024-01"),
                &core_lexicon().to_string(),
                |_| {},
            )
            .await
            .unwrap();
    }

    let store = Arc::new(DirStore::open(dir.path()).await.unwrap());
    let matcher = TermMatcher::builder(store)
        .config(EngineConfig::uncached())
        .build();
    let index = matcher.entry_store().dictionary_index().await.unwrap();
    assert_eq!(index["JMdict"].revision, "2024-01");

    let results = matcher.lookup("食べました").await.unwrap();
    assert_eq!(terms(&results), vec!["食べる"]);

    let importer = Importer::new(matcher.entry_store().clone());
    importer.delete_dictionary("JMdict").await.unwrap();
    assert!(matcher.lookup("食べました").await.unwrap().is_empty());
    assert!(importer.find_orphaned_buckets().await.unwrap().is_empty());
}
