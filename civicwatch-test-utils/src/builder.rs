//! Declarative test builder.
//!
//! Configuration calls are queued and executed in order by `build()`: tables first, then
//! seeded records, then mock endpoints.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_civic_tables: bool,

    users: Vec<entity::civic_user::Model>,
    issues: Vec<entity::issue::Model>,

    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_civic_tables: false,
            users: Vec::new(),
            issues: Vec::new(),
            mock_builders: Vec::new(),
        }
    }

    /// Create every table the server uses.
    pub fn with_civic_tables(mut self) -> Self {
        self.include_civic_tables = true;
        self
    }

    /// Create a single entity table.
    ///
    /// ```no_run
    /// use civicwatch_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), civicwatch_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(CivicUser)
    ///     .with_table(Issue)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Seed a profile record.
    pub fn with_user(mut self, user: entity::civic_user::Model) -> Self {
        self.users.push(user);
        self
    }

    /// Seed an issue record. The model's `id` is ignored and assigned by the database.
    pub fn with_issue(mut self, issue: entity::issue::Model) -> Self {
        self.issues.push(issue);
        self
    }

    /// Register a mock endpoint on the test server.
    ///
    /// The closure receives the server and returns the created mock, which is kept for
    /// [`TestContext::assert_mocks`].
    pub fn with_mock_endpoint<F>(mut self, builder: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(builder));
        self
    }

    /// Build the test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Tables created, records seeded, endpoints registered
    /// - `Err(TestError::DbErr)` - Table creation or a seed insert failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut test = TestContext::new().await?;

        let mut all_tables = Vec::new();
        if self.include_civic_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::CivicUser),
                schema.create_table_from_entity(entity::prelude::Issue),
                schema.create_table_from_entity(entity::prelude::DailyAnalytics),
                schema.create_table_from_entity(entity::prelude::Alert),
                schema.create_table_from_entity(entity::prelude::NotificationLog),
            ]);
        }
        all_tables.extend(self.tables);
        test.with_tables(all_tables).await?;

        for user in self.users {
            test.user().insert(user).await?;
        }
        for issue in self.issues {
            test.issue().insert(issue).await?;
        }

        for builder in self.mock_builders {
            let mock = builder(&mut test.server);
            test.mocks.push(mock);
        }

        Ok(test)
    }
}
