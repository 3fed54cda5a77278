use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    self, Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter, PointId,
    PointStruct, SearchPointsBuilder, UpsertPointsBuilder, Value as QdrantValue,
    VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use tracing::{debug, info};
use uuid::Uuid;

use super::QdrantConfig;
use crate::error::{VectorError, VectorResult};
use crate::index::VectorIndex;
use crate::models::{ChunkPayload, ChunkPoint, ScoredChunk, DOCUMENT_ID_KEY, TENANT_ID_KEY};

/// Qdrant-backed implementation of [`VectorIndex`]
///
/// One collection serves every tenant; the `tenant_id` payload filter is the
/// isolation boundary.
pub struct QdrantIndex {
    client: Qdrant,
    collection: String,
}

impl QdrantIndex {
    pub async fn new(config: QdrantConfig) -> VectorResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| VectorError::Qdrant(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            collection: config.collection,
        })
    }

    pub fn from_client(client: Qdrant, collection: impl Into<String>) -> Self {
        Self {
            client,
            collection: collection.into(),
        }
    }

    /// Reachability probe; lists collections the way the readiness check of
    /// the deployment expects.
    pub async fn check_health(&self) -> VectorResult<()> {
        self.client.list_collections().await?;
        Ok(())
    }

    fn uuid_to_point_id(id: Uuid) -> PointId {
        PointId::from(id.to_string())
    }

    fn point_id_to_uuid(point_id: &PointId) -> VectorResult<Uuid> {
        match &point_id.point_id_options {
            Some(qdrant::point_id::PointIdOptions::Uuid(uuid_str)) => Uuid::parse_str(uuid_str)
                .map_err(|e| VectorError::Internal(format!("Invalid UUID: {}", e))),
            // Every point this crate writes is UUID-keyed; a numeric id means
            // the collection holds foreign data
            Some(qdrant::point_id::PointIdOptions::Num(num)) => Err(VectorError::Internal(
                format!("Unexpected numeric point ID: {}", num),
            )),
            None => Err(VectorError::Internal("Missing point ID".to_string())),
        }
    }

    fn tenant_filter(tenant_id: &str) -> Filter {
        Filter::must([Condition::matches(TENANT_ID_KEY, tenant_id.to_string())])
    }

    fn document_filter(tenant_id: &str, document_id: Uuid) -> Filter {
        Filter::must([
            Condition::matches(TENANT_ID_KEY, tenant_id.to_string()),
            Condition::matches(DOCUMENT_ID_KEY, document_id.to_string()),
        ])
    }

    fn collection_dimension(info: &qdrant::CollectionInfo) -> Option<u64> {
        let params = info.config.as_ref()?.params.as_ref()?;
        match params.vectors_config.as_ref()?.config.as_ref()? {
            qdrant::vectors_config::Config::Params(p) => Some(p.size),
            qdrant::vectors_config::Config::ParamsMap(map) => {
                map.map.values().next().map(|p| p.size)
            }
        }
    }

    fn verify_dimension(
        collection: &str,
        existing: Option<u64>,
        requested: u64,
    ) -> VectorResult<()> {
        let existing = existing.ok_or_else(|| {
            VectorError::Internal("Collection info missing vector params".to_string())
        })?;

        if existing != requested {
            return Err(VectorError::Config(format!(
                "Collection '{}' has dimension {}, embeddings have dimension {}; \
                 a single embedding model must be active per deployment",
                collection, existing, requested
            )));
        }

        Ok(())
    }
}

fn payload_to_qdrant(payload: &ChunkPayload) -> HashMap<String, QdrantValue> {
    let mut map = HashMap::new();
    map.insert(
        DOCUMENT_ID_KEY.to_string(),
        QdrantValue::from(payload.document_id.to_string()),
    );
    map.insert(
        "chunk_id".to_string(),
        QdrantValue::from(payload.chunk_id.to_string()),
    );
    map.insert(
        TENANT_ID_KEY.to_string(),
        QdrantValue::from(payload.tenant_id.clone()),
    );
    map.insert(
        "chunk_index".to_string(),
        QdrantValue::from(payload.chunk_index as i64),
    );
    map.insert("text".to_string(), QdrantValue::from(payload.text.clone()));
    map.insert(
        "title".to_string(),
        QdrantValue::from(payload.title.clone()),
    );
    map.insert(
        "source".to_string(),
        QdrantValue::from(payload.source.clone()),
    );
    map
}

fn payload_from_qdrant(map: &HashMap<String, QdrantValue>) -> Option<ChunkPayload> {
    Some(ChunkPayload {
        document_id: get_uuid(map, DOCUMENT_ID_KEY)?,
        chunk_id: get_uuid(map, "chunk_id")?,
        tenant_id: get_str(map, TENANT_ID_KEY)?,
        chunk_index: get_int(map, "chunk_index")? as u32,
        text: get_str(map, "text")?,
        title: get_str(map, "title")?,
        source: get_str(map, "source")?,
    })
}

fn get_str(map: &HashMap<String, QdrantValue>, key: &str) -> Option<String> {
    match &map.get(key)?.kind {
        Some(qdrant::value::Kind::StringValue(s)) => Some(s.clone()),
        _ => None,
    }
}

fn get_int(map: &HashMap<String, QdrantValue>, key: &str) -> Option<i64> {
    match &map.get(key)?.kind {
        Some(qdrant::value::Kind::IntegerValue(i)) => Some(*i),
        _ => None,
    }
}

fn get_uuid(map: &HashMap<String, QdrantValue>, key: &str) -> Option<Uuid> {
    get_str(map, key).and_then(|s| Uuid::parse_str(&s).ok())
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn ensure_collection(&self, dimension: u64) -> VectorResult<()> {
        // Absence and outage must stay distinguishable; a connectivity error
        // propagates instead of triggering a doomed create
        if self.client.collection_exists(&self.collection).await? {
            let info = self.client.collection_info(&self.collection).await?;
            Self::verify_dimension(
                &self.collection,
                info.result.as_ref().and_then(Self::collection_dimension),
                dimension,
            )?;

            debug!(collection = %self.collection, dimension, "Collection already exists");
            Ok(())
        } else {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection)
                        .vectors_config(VectorParamsBuilder::new(dimension, Distance::Cosine)),
                )
                .await?;

            info!(collection = %self.collection, dimension, "Created vector collection");
            Ok(())
        }
    }

    async fn upsert(&self, points: Vec<ChunkPoint>) -> VectorResult<()> {
        if points.is_empty() {
            return Ok(());
        }

        let count = points.len();
        let points: Vec<PointStruct> = points
            .into_iter()
            .map(|p| {
                PointStruct::new(
                    Self::uuid_to_point_id(p.id),
                    p.vector,
                    payload_to_qdrant(&p.payload),
                )
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await?;

        debug!(collection = %self.collection, count, "Upserted points");
        Ok(())
    }

    async fn search(
        &self,
        tenant_id: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> VectorResult<Vec<ScoredChunk>> {
        let builder = SearchPointsBuilder::new(&self.collection, vector, limit)
            .filter(Self::tenant_filter(tenant_id))
            .with_payload(true);

        let results = self.client.search_points(builder).await?;

        results
            .result
            .into_iter()
            .map(|point| {
                let id = point
                    .id
                    .as_ref()
                    .map(Self::point_id_to_uuid)
                    .transpose()?
                    .ok_or_else(|| VectorError::Internal("Missing point ID".to_string()))?;

                Ok(ScoredChunk {
                    id,
                    score: point.score,
                    payload: payload_from_qdrant(&point.payload),
                })
            })
            .collect()
    }

    async fn delete_by_document(&self, tenant_id: &str, document_id: Uuid) -> VectorResult<()> {
        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection)
                    .points(Self::document_filter(tenant_id, document_id))
                    .wait(true),
            )
            .await?;

        // Qdrant's filtered delete acknowledges the operation but does not
        // report how many points matched; no count is surfaced rather than a
        // guessed one.
        debug!(collection = %self.collection, %document_id, "Deleted points by document filter");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> ChunkPayload {
        ChunkPayload {
            document_id: Uuid::new_v4(),
            chunk_id: Uuid::new_v4(),
            tenant_id: "t1".to_string(),
            chunk_index: 3,
            text: "Open 9-5 Mon-Fri".to_string(),
            title: "Hours".to_string(),
            source: "policy".to_string(),
        }
    }

    #[test]
    fn test_payload_round_trip() {
        let payload = sample_payload();
        let map = payload_to_qdrant(&payload);
        let parsed = payload_from_qdrant(&map).expect("payload should parse back");
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_payload_missing_field_is_none() {
        let payload = sample_payload();
        let mut map = payload_to_qdrant(&payload);
        map.remove(TENANT_ID_KEY);
        assert!(payload_from_qdrant(&map).is_none());
    }

    #[test]
    fn test_point_id_round_trip() {
        let id = Uuid::new_v4();
        let point_id = QdrantIndex::uuid_to_point_id(id);
        assert_eq!(QdrantIndex::point_id_to_uuid(&point_id).unwrap(), id);
    }

    #[test]
    fn test_numeric_point_id_is_rejected() {
        let point_id = PointId::from(42u64);
        assert!(matches!(
            QdrantIndex::point_id_to_uuid(&point_id),
            Err(VectorError::Internal(_))
        ));
    }

    fn collection_info_with_dimension(size: u64) -> qdrant::CollectionInfo {
        qdrant::CollectionInfo {
            config: Some(qdrant::CollectionConfig {
                params: Some(qdrant::CollectionParams {
                    vectors_config: Some(qdrant::VectorsConfig {
                        config: Some(qdrant::vectors_config::Config::Params(
                            qdrant::VectorParams {
                                size,
                                distance: Distance::Cosine as i32,
                                ..Default::default()
                            },
                        )),
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_collection_dimension_reads_vector_params() {
        let info = collection_info_with_dimension(1536);
        assert_eq!(QdrantIndex::collection_dimension(&info), Some(1536));
    }

    #[test]
    fn test_collection_dimension_missing_config_is_none() {
        let info = qdrant::CollectionInfo::default();
        assert_eq!(QdrantIndex::collection_dimension(&info), None);
    }

    #[test]
    fn test_matching_dimension_is_accepted() {
        let info = collection_info_with_dimension(1536);
        let existing = QdrantIndex::collection_dimension(&info);
        assert!(QdrantIndex::verify_dimension("chunks", existing, 1536).is_ok());
    }

    #[test]
    fn test_dimension_conflict_is_a_config_error() {
        let info = collection_info_with_dimension(1536);
        let existing = QdrantIndex::collection_dimension(&info);
        let err = QdrantIndex::verify_dimension("chunks", existing, 768).unwrap_err();
        assert!(matches!(err, VectorError::Config(_)));
        assert!(err.to_string().contains("1536"));
        assert!(err.to_string().contains("768"));
    }

    #[test]
    fn test_unreadable_collection_params_are_an_internal_error() {
        assert!(matches!(
            QdrantIndex::verify_dimension("chunks", None, 1536),
            Err(VectorError::Internal(_))
        ));
    }
}
