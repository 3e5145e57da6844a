use sea_orm_migration::{prelude::*, schema::*};

static IDX_ISSUE_CITY_CREATED_AT: &str = "idx-issue-city-created_at";
static IDX_ISSUE_REPORTER_ID: &str = "idx-issue-reporter_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Issue::Table)
                    .if_not_exists()
                    .col(pk_auto(Issue::Id))
                    .col(string(Issue::Title))
                    .col(string(Issue::City))
                    .col(string(Issue::Category))
                    .col(string(Issue::Priority))
                    .col(string(Issue::Status))
                    .col(string(Issue::ReporterId))
                    .col(string(Issue::ReporterName))
                    .col(string(Issue::ReporterEmail))
                    .col(string_null(Issue::AssignedDepartment))
                    .col(integer_null(Issue::FeedbackRating))
                    .col(text_null(Issue::FeedbackComment))
                    .col(timestamp(Issue::CreatedAt))
                    .col(timestamp(Issue::UpdatedAt))
                    .col(timestamp_null(Issue::ResolvedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ISSUE_CITY_CREATED_AT)
                    .table(Issue::Table)
                    .col(Issue::City)
                    .col(Issue::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ISSUE_REPORTER_ID)
                    .table(Issue::Table)
                    .col(Issue::ReporterId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Issue::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Issue {
    Table,
    Id,
    Title,
    City,
    Category,
    Priority,
    Status,
    ReporterId,
    ReporterName,
    ReporterEmail,
    AssignedDepartment,
    FeedbackRating,
    FeedbackComment,
    CreatedAt,
    UpdatedAt,
    ResolvedAt,
}
