//! Document export and statistics over a real store.

use super::helpers::{TestStore, store};
use crate::test_helpers::FixedClock;
use camino::Utf8PathBuf;
use rstest::rstest;
use secondbrain::experience::{
    adapters::sqlite::SqliteExperienceRepository, services::ExperienceRequest,
};
use secondbrain::rag::{DOCUMENT_SOURCE, DOCUMENT_TYPE, ExportEnvelope, RagService};
use std::sync::Arc;

async fn seed(store: &TestStore) {
    let service = store.experiences();
    for request in [
        ExperienceRequest::new("Cache stampede")
            .with_content("Added jitter to expiry.")
            .with_tags("redis, performance")
            .with_category("Technical"),
        ExperienceRequest::new("Planning poker").with_context("Quarterly planning"),
    ] {
        service
            .create(request)
            .await
            .expect("seeding should succeed");
    }
}

fn rag(store: &TestStore) -> RagService<SqliteExperienceRepository, FixedClock> {
    RagService::new(
        Arc::new(SqliteExperienceRepository::new(store.pool.clone())),
        Arc::clone(&store.clock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn export_file_holds_every_document(store: TestStore) {
    seed(&store).await;
    let path = Utf8PathBuf::from_path_buf(store.dir.path().join("experiences_export.json"))
        .expect("temp path should be UTF-8");

    let written = rag(&store)
        .export_to_file(&path)
        .await
        .expect("export should succeed");
    let envelope: ExportEnvelope = serde_json::from_str(
        &std::fs::read_to_string(&written).expect("export should be readable"),
    )
    .expect("export should parse");

    assert_eq!(envelope.total_records, 2);
    assert_eq!(envelope.data.len(), 2);
    let cache = envelope
        .data
        .iter()
        .find(|doc| doc.title == "Cache stampede")
        .expect("seeded document should be exported");
    assert_eq!(cache.tags, vec!["redis", "performance"]);
    assert_eq!(cache.content, "Added jitter to expiry.");
    assert_eq!(cache.metadata.kind, DOCUMENT_TYPE);
    assert_eq!(cache.metadata.source, DOCUMENT_SOURCE);
    assert!(cache.metadata.has_tags);
    assert!(cache.metadata.has_category);
    assert!(!cache.metadata.has_context);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statistics_reflect_stored_experiences(store: TestStore) {
    seed(&store).await;

    let stats = rag(&store)
        .compute_statistics()
        .await
        .expect("statistics should succeed");

    assert_eq!(stats.total_experiences, 2);
    assert_eq!(stats.experiences_with_tags, 1);
    assert_eq!(stats.experiences_with_context, 1);
    assert_eq!(stats.category_distribution.get("Technical"), Some(&1));
    assert_eq!(stats.category_distribution.get("Uncategorized"), Some(&1));
    assert_eq!(stats.unique_tags, 2);
}
