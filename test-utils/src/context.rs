use migration::TableSpec;
use sea_orm::{Database, DatabaseConnection};

use crate::error::TestError;

/// A private in-memory SQLite database for one test.
///
/// Every context opens its own `sqlite::memory:` connection, so tests never see each
/// other's rows. The connection is opened on first use and dropped with the context.
#[derive(Default)]
pub struct TestContext {
    /// Connection to the test database, `None` until first used.
    pub db: Option<DatabaseConnection>,
}

impl TestContext {
    /// Creates a context that has not connected yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the test database, connecting on first call.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Open connection
    /// - `Err(TestError::Database)` - SQLite could not be opened
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            self.db = Some(Database::connect("sqlite::memory:").await?);
        }

        self.db
            .as_ref()
            .ok_or_else(|| TestError::Database(sea_orm::DbErr::Custom("no test database".into())))
    }

    /// Runs `ensure_table` for each declaration, in order.
    ///
    /// Ensuring an older layout before the current one leaves the table exactly as a
    /// database created by an earlier release and then upgraded would look.
    ///
    /// # Arguments
    /// - `specs` - Table declarations to apply
    ///
    /// # Returns
    /// - `Ok(())` - Every declaration applied
    /// - `Err(TestError::Database)` - A create or alter statement failed
    pub async fn with_tables(&mut self, specs: &[&'static TableSpec]) -> Result<(), TestError> {
        let db = self.database().await?;

        for spec in specs {
            migration::ensure_table(db, spec).await?;
        }

        Ok(())
    }
}
