use sea_orm_migration::{prelude::*, schema::*};

static IDX_ALERT_IS_ACTIVE_EXPIRES_AT: &str = "idx-alert-is_active-expires_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alert::Table)
                    .if_not_exists()
                    .col(pk_auto(Alert::Id))
                    .col(string(Alert::Title))
                    .col(text(Alert::Message))
                    .col(string(Alert::AlertType))
                    .col(string(Alert::Priority))
                    .col(string(Alert::City))
                    .col(double_null(Alert::Latitude))
                    .col(double_null(Alert::Longitude))
                    .col(double(Alert::RadiusKm))
                    .col(boolean(Alert::IsActive))
                    .col(string(Alert::CreatedBy))
                    .col(timestamp(Alert::CreatedAt))
                    .col(timestamp(Alert::ExpiresAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ALERT_IS_ACTIVE_EXPIRES_AT)
                    .table(Alert::Table)
                    .col(Alert::IsActive)
                    .col(Alert::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alert::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Alert {
    Table,
    Id,
    Title,
    Message,
    AlertType,
    Priority,
    City,
    Latitude,
    Longitude,
    RadiusKm,
    IsActive,
    CreatedBy,
    CreatedAt,
    ExpiresAt,
}
