use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn issue(&mut self) -> IssueFixtures<'_> {
        IssueFixtures { test: self }
    }
}

pub struct IssueFixtures<'a> {
    test: &'a mut TestContext,
}

impl IssueFixtures<'_> {
    /// Insert an issue; the model's `id` is assigned by the database.
    pub async fn insert(&self, issue: entity::issue::Model) -> Result<entity::issue::Model, TestError> {
        let am = entity::issue::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(issue.title),
            city: ActiveValue::Set(issue.city),
            category: ActiveValue::Set(issue.category),
            priority: ActiveValue::Set(issue.priority),
            status: ActiveValue::Set(issue.status),
            reporter_id: ActiveValue::Set(issue.reporter_id),
            reporter_name: ActiveValue::Set(issue.reporter_name),
            reporter_email: ActiveValue::Set(issue.reporter_email),
            assigned_department: ActiveValue::Set(issue.assigned_department),
            feedback_rating: ActiveValue::Set(issue.feedback_rating),
            feedback_comment: ActiveValue::Set(issue.feedback_comment),
            created_at: ActiveValue::Set(issue.created_at),
            updated_at: ActiveValue::Set(issue.updated_at),
            resolved_at: ActiveValue::Set(issue.resolved_at),
        };

        Ok(entity::prelude::Issue::insert(am)
            .exec_with_returning(&self.test.db)
            .await?)
    }

    /// Insert several issues in order.
    pub async fn insert_many(
        &self,
        issues: Vec<entity::issue::Model>,
    ) -> Result<Vec<entity::issue::Model>, TestError> {
        let mut inserted = Vec::with_capacity(issues.len());
        for issue in issues {
            inserted.push(self.insert(issue).await?);
        }

        Ok(inserted)
    }

    /// All issues whose reporter is `reporter_id`.
    pub async fn by_reporter(&self, reporter_id: &str) -> Result<Vec<entity::issue::Model>, TestError> {
        Ok(entity::prelude::Issue::find()
            .filter(entity::issue::Column::ReporterId.eq(reporter_id))
            .all(&self.test.db)
            .await?)
    }
}
