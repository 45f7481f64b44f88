use migration::TableSpec;

use crate::{context::TestContext, error::TestError};

/// Sets up a `TestContext` with the tables a test needs.
///
/// Tables are given as `TableSpec` declarations, the same data the bot ensures at
/// startup, so tests exercise the real create-or-widen path.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use migration::guild_config::GUILD_CONFIG;
///
/// let test = TestBuilder::new()
///     .with_table(&GUILD_CONFIG)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    /// Declared tables to bring into existence during `build()`.
    ///
    /// Tables are ensured in the order they were added, so a test can add an older
    /// declaration first and a newer one afterwards to reproduce a widened table.
    tables: Vec<&'static TableSpec>,
}

impl TestBuilder {
    /// Creates a builder with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declared table to the test database schema.
    ///
    /// The table is created (or widened, if an earlier declaration of the same table
    /// was added before it) when `build()` is called.
    ///
    /// # Arguments
    /// - `spec` - Declared table layout
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table(mut self, spec: &'static TableSpec) -> Self {
        self.tables.push(spec);
        self
    }

    /// Adds the `guild_config` table at its current declaration.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_guild_config_table(self) -> Self {
        self.with_table(&migration::guild_config::GUILD_CONFIG)
    }

    /// Opens the test database and ensures the added tables.
    ///
    /// The database is opened even when no table was added.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with its connection open
    /// - `Err(TestError::Database)` - Connecting or ensuring a table failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();
        context.with_tables(&self.tables).await?;

        Ok(context)
    }
}
