use sea_orm_migration::{prelude::*, schema::*};

static IDX_CIVIC_USER_CITY: &str = "idx-civic_user-city";
static IDX_CIVIC_USER_FCM_TOKEN: &str = "idx-civic_user-fcm_token";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CivicUser::Table)
                    .if_not_exists()
                    .col(string(CivicUser::Uid).primary_key())
                    .col(string_null(CivicUser::Email))
                    .col(string(CivicUser::DisplayName))
                    .col(string(CivicUser::PhotoUrl))
                    .col(string(CivicUser::Role))
                    .col(boolean(CivicUser::IsActive))
                    .col(string_null(CivicUser::City))
                    .col(string(CivicUser::Language))
                    .col(string(CivicUser::Theme))
                    .col(boolean(CivicUser::PushEnabled))
                    .col(boolean(CivicUser::EmailEnabled))
                    .col(boolean(CivicUser::WhatsappEnabled))
                    .col(boolean(CivicUser::AlertsEnabled))
                    .col(string_null(CivicUser::FcmToken))
                    .col(timestamp_null(CivicUser::TokenUpdatedAt))
                    .col(double_null(CivicUser::LastKnownLatitude))
                    .col(double_null(CivicUser::LastKnownLongitude))
                    .col(timestamp_null(CivicUser::LastActiveAt))
                    .col(integer(CivicUser::TotalReports))
                    .col(integer(CivicUser::ResolvedReports))
                    .col(integer(CivicUser::FeedbackGiven))
                    .col(timestamp(CivicUser::CreatedAt))
                    .col(timestamp(CivicUser::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CIVIC_USER_CITY)
                    .table(CivicUser::Table)
                    .col(CivicUser::City)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CIVIC_USER_FCM_TOKEN)
                    .table(CivicUser::Table)
                    .col(CivicUser::FcmToken)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CivicUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CivicUser {
    Table,
    Uid,
    Email,
    DisplayName,
    PhotoUrl,
    Role,
    IsActive,
    City,
    Language,
    Theme,
    PushEnabled,
    EmailEnabled,
    WhatsappEnabled,
    AlertsEnabled,
    FcmToken,
    TokenUpdatedAt,
    LastKnownLatitude,
    LastKnownLongitude,
    LastActiveAt,
    TotalReports,
    ResolvedReports,
    FeedbackGiven,
    CreatedAt,
    UpdatedAt,
}
