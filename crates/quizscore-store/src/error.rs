//! Mapping of backend failures onto [`StoreError`].

use quizscore_core::StoreError;

/// Converts `sqlx` results into store results, keeping the failing operation in the message.
pub(crate) trait SqlxResultExt<T> {
    fn backend(self, operation: &str) -> Result<T, StoreError>;
}

impl<T> SqlxResultExt<T> for Result<T, sqlx::Error> {
    fn backend(self, operation: &str) -> Result<T, StoreError> {
        self.map_err(|e| match e {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Corrupt(format!("{operation}: {e}"))
            }
            other => StoreError::Backend(format!("{operation}: {other}")),
        })
    }
}
