use thiserror::Error;

/// Errors raised by the guild configuration store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying database failed.
    ///
    /// The store does not retry; the caller decides whether to surface or retry.
    #[error(transparent)]
    Storage(#[from] sea_orm::DbErr),

    /// A JSON column holds a value that cannot be decoded.
    ///
    /// Raised for JSON columns that fail to decode and for id columns holding
    /// something other than a snowflake. Blank id columns read as unset.
    #[error("Failed to decode stored value of column '{column}': {source}")]
    Parse {
        /// Name of the column that failed to decode
        column: &'static str,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// A value was supplied for a key of a different kind.
    ///
    /// Indicates a bug in the caller, e.g. passing a role list for the prefix key.
    #[error("Value does not match the kind of configuration key '{key}'")]
    ValueMismatch {
        /// Column name of the key that was written
        key: &'static str,
    },
}
