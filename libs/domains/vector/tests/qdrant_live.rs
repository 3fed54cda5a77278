//! Live-Qdrant tests for QdrantIndex.
//!
//! Requires a running Qdrant with QDRANT_URL set; run with
//! `cargo test -p domain_vector -- --ignored`.

use core_config::FromEnv;
use domain_vector::{
    ChunkPayload, ChunkPoint, QdrantConfig, QdrantIndex, VectorError, VectorIndex,
};
use uuid::Uuid;

async fn index() -> QdrantIndex {
    let config = QdrantConfig::from_env()
        .expect("QDRANT_URL must be set")
        .with_collection(format!("test_{}", Uuid::new_v4().simple()));
    QdrantIndex::new(config).await.expect("failed to connect")
}

fn point(tenant_id: &str, document_id: Uuid, chunk_index: u32, vector: Vec<f32>) -> ChunkPoint {
    let chunk_id = Uuid::new_v4();
    ChunkPoint::new(
        chunk_id,
        vector,
        ChunkPayload {
            document_id,
            chunk_id,
            tenant_id: tenant_id.to_string(),
            chunk_index,
            text: format!("chunk {}", chunk_index),
            title: "Hours".to_string(),
            source: "policy".to_string(),
        },
    )
}

#[tokio::test]
#[ignore]
async fn test_ensure_collection_is_idempotent_but_rejects_dimension_change() {
    let index = index().await;

    index.ensure_collection(4).await.unwrap();
    index.ensure_collection(4).await.unwrap();

    let result = index.ensure_collection(8).await;
    assert!(matches!(result, Err(VectorError::Config(_))));
}

#[tokio::test]
#[ignore]
async fn test_search_is_tenant_filtered_and_rank_ordered() {
    let index = index().await;
    index.ensure_collection(4).await.unwrap();

    let doc_a = Uuid::new_v4();
    let doc_b = Uuid::new_v4();
    index
        .upsert(vec![
            point("t1", doc_a, 0, vec![1.0, 0.0, 0.0, 0.0]),
            point("t1", doc_a, 1, vec![0.6, 0.8, 0.0, 0.0]),
            point("t2", doc_b, 0, vec![1.0, 0.0, 0.0, 0.0]),
        ])
        .await
        .unwrap();

    let hits = index
        .search("t1", vec![1.0, 0.0, 0.0, 0.0], 10)
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert!(hits[0].score >= hits[1].score);
    for hit in &hits {
        let payload = hit.payload.as_ref().expect("payload should hydrate");
        assert_eq!(payload.tenant_id, "t1");
        assert_eq!(payload.document_id, doc_a);
        assert_eq!(hit.id, payload.chunk_id);
    }

    let other = index
        .search("t2", vec![1.0, 0.0, 0.0, 0.0], 10)
        .await
        .unwrap();
    assert_eq!(other.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_delete_by_document_is_scoped_to_tenant_and_document() {
    let index = index().await;
    index.ensure_collection(4).await.unwrap();

    let doc_a = Uuid::new_v4();
    let doc_b = Uuid::new_v4();
    index
        .upsert(vec![
            point("t1", doc_a, 0, vec![1.0, 0.0, 0.0, 0.0]),
            point("t1", doc_a, 1, vec![0.0, 1.0, 0.0, 0.0]),
            point("t1", doc_b, 0, vec![0.0, 0.0, 1.0, 0.0]),
            point("t2", doc_a, 0, vec![0.0, 0.0, 0.0, 1.0]),
        ])
        .await
        .unwrap();

    // wrong tenant deletes nothing
    index.delete_by_document("t2", doc_b).await.unwrap();
    assert_eq!(
        index
            .search("t1", vec![0.0, 0.0, 1.0, 0.0], 10)
            .await
            .unwrap()
            .len(),
        3
    );

    index.delete_by_document("t1", doc_a).await.unwrap();

    let remaining = index
        .search("t1", vec![1.0, 0.0, 0.0, 0.0], 10)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(
        remaining[0].payload.as_ref().unwrap().document_id,
        doc_b
    );

    // the other tenant's copy of doc_a survives
    let other = index
        .search("t2", vec![0.0, 0.0, 0.0, 1.0], 10)
        .await
        .unwrap();
    assert_eq!(other.len(), 1);
}
