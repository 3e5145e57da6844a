use sea_orm_migration::{prelude::*, schema::*};

static IDX_NOTIFICATION_LOG_CREATED_AT: &str = "idx-notification_log-created_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NotificationLog::Table)
                    .if_not_exists()
                    .col(pk_auto(NotificationLog::Id))
                    .col(string(NotificationLog::Kind))
                    .col(string(NotificationLog::Title))
                    .col(string(NotificationLog::Audience))
                    .col(string_null(NotificationLog::City))
                    .col(integer(NotificationLog::Targeted))
                    .col(integer(NotificationLog::SentCount))
                    .col(timestamp(NotificationLog::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_NOTIFICATION_LOG_CREATED_AT)
                    .table(NotificationLog::Table)
                    .col(NotificationLog::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum NotificationLog {
    Table,
    Id,
    Kind,
    Title,
    Audience,
    City,
    Targeted,
    SentCount,
    CreatedAt,
}
