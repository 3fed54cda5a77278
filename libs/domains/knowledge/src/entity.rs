//! Sea-ORM entities for the documents and chunks tables

pub mod documents {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "documents")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub tenant_id: String,
        pub source: String,
        pub title: String,
        #[sea_orm(column_type = "Text")]
        pub content: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::chunks::Entity")]
        Chunks,
    }

    impl Related<super::chunks::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Chunks.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Document {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                tenant_id: model.tenant_id,
                source: model.source,
                title: model.title,
                content: model.content,
                created_at: model.created_at,
            }
        }
    }
}

pub mod chunks {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "chunks")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub document_id: Uuid,
        pub tenant_id: String,
        pub chunk_index: i32,
        #[sea_orm(column_type = "Text")]
        pub content: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::documents::Entity",
            from = "Column::DocumentId",
            to = "super::documents::Column::Id"
        )]
        Document,
    }

    impl Related<super::documents::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Document.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Chunk {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                document_id: model.document_id,
                tenant_id: model.tenant_id,
                chunk_index: model.chunk_index as u32,
                content: model.content,
                created_at: model.created_at,
            }
        }
    }
}

pub use chunks::Entity as ChunksEntity;
pub use documents::Entity as DocumentsEntity;
