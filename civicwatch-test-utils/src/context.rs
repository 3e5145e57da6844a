//! Test context returned by [`TestBuilder`](crate::TestBuilder).

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// Test environment holding an in-memory SQLite database and a mock HTTP server.
///
/// ```ignore
/// let mut test = TestBuilder::new().with_civic_tables().build().await?;
///
/// test.user().insert(factory::user("u1")).await?;
/// let url = test.server_url();
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database
    pub db: DatabaseConnection,

    pub(crate) server: ServerGuard,
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(Self {
            db,
            server,
            mocks: Vec::new(),
        })
    }

    pub(crate) async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock HTTP server.
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    /// Mutable access to the mock server for endpoints created during the test body.
    pub fn server(&mut self) -> &mut ServerGuard {
        &mut self.server
    }

    /// Assert all mock endpoints registered through the builder were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
