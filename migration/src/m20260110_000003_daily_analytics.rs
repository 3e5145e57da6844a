use sea_orm_migration::{prelude::*, schema::*};

static IDX_DAILY_ANALYTICS_CITY_DATE: &str = "idx-daily_analytics-city-date";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailyAnalytics::Table)
                    .if_not_exists()
                    .col(string(DailyAnalytics::Id).primary_key())
                    .col(string(DailyAnalytics::City))
                    .col(timestamp(DailyAnalytics::Date))
                    .col(integer(DailyAnalytics::TotalIssues))
                    .col(integer(DailyAnalytics::ResolvedIssues))
                    .col(integer(DailyAnalytics::EmergencyIssues))
                    .col(json(DailyAnalytics::CategoryBreakdown))
                    .col(json(DailyAnalytics::PriorityBreakdown))
                    .col(timestamp(DailyAnalytics::GeneratedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DAILY_ANALYTICS_CITY_DATE)
                    .table(DailyAnalytics::Table)
                    .col(DailyAnalytics::City)
                    .col(DailyAnalytics::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DailyAnalytics::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DailyAnalytics {
    Table,
    Id,
    City,
    Date,
    TotalIssues,
    ResolvedIssues,
    EmergencyIssues,
    CategoryBreakdown,
    PriorityBreakdown,
    GeneratedAt,
}
