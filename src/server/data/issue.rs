use chrono::NaiveDateTime;
use migration::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    db::IssueModel,
    issue::{deleted_reporter, IssueStatus},
};

/// Report counts for one reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReporterCounts {
    pub total: u64,
    pub resolved: u64,
    pub with_feedback: u64,
}

pub struct IssueRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> IssueRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Issues of `city` created in `[start, end)`
    pub async fn find_created_between(
        &self,
        city: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<IssueModel>, DbErr> {
        entity::prelude::Issue::find()
            .filter(entity::issue::Column::City.eq(city))
            .filter(entity::issue::Column::CreatedAt.gte(start))
            .filter(entity::issue::Column::CreatedAt.lt(end))
            .order_by_asc(entity::issue::Column::Id)
            .all(self.db)
            .await
    }

    /// All issues of `city`, optionally restricted to one assigned department
    pub async fn find_by_city(
        &self,
        city: &str,
        department: Option<&str>,
    ) -> Result<Vec<IssueModel>, DbErr> {
        let mut query =
            entity::prelude::Issue::find().filter(entity::issue::Column::City.eq(city));

        if let Some(department) = department {
            query = query.filter(entity::issue::Column::AssignedDepartment.eq(department));
        }

        query
            .order_by_asc(entity::issue::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn count_by_reporter(&self, reporter_id: &str) -> Result<ReporterCounts, DbErr> {
        let by_reporter = || {
            entity::prelude::Issue::find()
                .filter(entity::issue::Column::ReporterId.eq(reporter_id))
        };

        let total = by_reporter().count(self.db).await?;
        let resolved = by_reporter()
            .filter(entity::issue::Column::Status.eq(IssueStatus::Resolved.as_str()))
            .count(self.db)
            .await?;
        let with_feedback = by_reporter()
            .filter(entity::issue::Column::FeedbackRating.is_not_null())
            .count(self.db)
            .await?;

        Ok(ReporterCounts {
            total,
            resolved,
            with_feedback,
        })
    }

    /// Replaces the reporter fields of every issue authored by `reporter_id` with the
    /// deleted-account sentinel, returning the number of issues updated
    pub async fn anonymize_reporter(&self, reporter_id: &str, now: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::Issue::update_many()
            .col_expr(entity::issue::Column::ReporterId, Expr::value(deleted_reporter::ID))
            .col_expr(
                entity::issue::Column::ReporterName,
                Expr::value(deleted_reporter::NAME),
            )
            .col_expr(
                entity::issue::Column::ReporterEmail,
                Expr::value(deleted_reporter::EMAIL),
            )
            .col_expr(entity::issue::Column::UpdatedAt, Expr::value(now))
            .filter(entity::issue::Column::ReporterId.eq(reporter_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
