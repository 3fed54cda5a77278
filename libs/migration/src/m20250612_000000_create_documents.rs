use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create documents table
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(pk_uuid(Documents::Id))
                    .col(string(Documents::TenantId))
                    .col(string(Documents::Source))
                    .col(string(Documents::Title))
                    .col(text(Documents::Content))
                    .col(
                        timestamp_with_time_zone(Documents::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create chunks table; deleting a document removes its chunks at the
        // store level, not in application code
        manager
            .create_table(
                Table::create()
                    .table(Chunks::Table)
                    .if_not_exists()
                    .col(pk_uuid(Chunks::Id))
                    .col(uuid(Chunks::DocumentId))
                    .col(string(Chunks::TenantId))
                    .col(integer(Chunks::ChunkIndex))
                    .col(text(Chunks::Content))
                    .col(
                        timestamp_with_time_zone(Chunks::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chunks_document_id")
                            .from(Chunks::Table, Chunks::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A chunk index is unique within its document
        manager
            .create_index(
                Index::create()
                    .name("uq_chunks_document_id_chunk_index")
                    .table(Chunks::Table)
                    .col(Chunks::DocumentId)
                    .col(Chunks::ChunkIndex)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Tenant-scoped lookups hit these on every read path
        manager
            .create_index(
                Index::create()
                    .name("idx_documents_tenant_id")
                    .table(Documents::Table)
                    .col(Documents::TenantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chunks_document_id")
                    .table(Chunks::Table)
                    .col(Chunks::DocumentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chunks_tenant_id")
                    .table(Chunks::Table)
                    .col(Chunks::TenantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chunks::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Documents {
    Table,
    Id,
    TenantId,
    Source,
    Title,
    Content,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Chunks {
    Table,
    Id,
    DocumentId,
    TenantId,
    ChunkIndex,
    Content,
    CreatedAt,
}
