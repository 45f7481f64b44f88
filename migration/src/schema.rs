use sea_orm_migration::{prelude::*, sea_orm::DatabaseConnection};

/// A single declared TEXT column.
///
/// Every column the store declares is a nullable TEXT column unless it carries a
/// default, in which case it is `NOT NULL DEFAULT <value>`. SQLite requires a
/// non-null default when a `NOT NULL` column is added to a populated table, so the
/// two properties are tied together here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name as stored in the database.
    pub name: &'static str,
    /// Declared default value, `None` for a nullable column defaulting to NULL.
    pub default: Option<&'static str>,
}

impl ColumnSpec {
    /// Declares a nullable column whose default is NULL.
    pub const fn nullable(name: &'static str) -> Self {
        Self {
            name,
            default: None,
        }
    }

    /// Declares a non-null column backfilled with `default`.
    pub const fn with_default(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            default: Some(default),
        }
    }

    fn column_def(&self) -> ColumnDef {
        let mut def = ColumnDef::new(Alias::new(self.name));
        def.text();

        match self.default {
            Some(default) => {
                def.not_null().default(default);
            }
            None => {
                def.null();
            }
        }

        def
    }
}

/// A declared table keyed by a single TEXT primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Table name.
    pub name: &'static str,
    /// Primary key column name.
    pub key: &'static str,
    /// Ordered list of declared data columns, excluding the key.
    pub columns: &'static [ColumnSpec],
}

impl TableSpec {
    /// Looks up a declared column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Names of the declared data columns in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.name)
    }
}

/// What [`ensure_table`] had to change to bring the stored table up to date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnsureOutcome {
    /// The table did not exist and was created with every declared column.
    pub created_table: bool,
    /// Columns added to an existing table, in declaration order.
    pub added_columns: Vec<&'static str>,
}

impl EnsureOutcome {
    /// Returns true when the stored table already matched the declaration.
    pub fn is_noop(&self) -> bool {
        !self.created_table && self.added_columns.is_empty()
    }
}

/// Brings the stored table in line with its declaration.
///
/// Creates the table when it does not exist. Otherwise compares the declared columns
/// against the stored table and adds each missing one with its declared default,
/// which SQLite applies to every existing row. Existing columns and their data are
/// never touched, so running this on every startup is safe and a second run is a
/// no-op.
///
/// # Arguments
/// - `db` - Database connection to migrate
/// - `spec` - Declared table layout
///
/// # Returns
/// - `Ok(EnsureOutcome)` - Table is now at the declared layout
/// - `Err(DbErr)` - Failed to inspect or alter the schema
pub async fn ensure_table(db: &DatabaseConnection, spec: &TableSpec) -> Result<EnsureOutcome, DbErr> {
    let manager = SchemaManager::new(db);

    if !manager.has_table(spec.name).await? {
        let mut table = Table::create();
        table
            .table(Alias::new(spec.name))
            .if_not_exists()
            .col(
                ColumnDef::new(Alias::new(spec.key))
                    .text()
                    .not_null()
                    .primary_key(),
            );

        for column in spec.columns {
            table.col(column.column_def());
        }

        manager.create_table(table).await?;

        return Ok(EnsureOutcome {
            created_table: true,
            added_columns: Vec::new(),
        });
    }

    let mut outcome = EnsureOutcome::default();

    for column in spec.columns {
        if manager.has_column(spec.name, column.name).await? {
            continue;
        }

        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new(spec.name))
                    .add_column(column.column_def())
                    .to_owned(),
            )
            .await?;

        outcome.added_columns.push(column.name);
    }

    Ok(outcome)
}
