use thiserror::Error;

/// Domain error taxonomy shared by the importer, the store and the API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed importer arguments or input (missing file, missing column).
    #[error("validation error: {0}")]
    Validation(String),

    /// A write would break a uniqueness or same-channel invariant outside
    /// the idempotent get-or-create path, or reference allocation failed.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Lookup by an unknown reference.
    #[error("not found: {0}")]
    NotFound(String),

    /// Anything else at the storage boundary.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CatalogError::Validation("csv file has no Category column".into());
        assert_eq!(
            err.to_string(),
            "validation error: csv file has no Category column"
        );

        let err = CatalogError::NotFound("channel amazon".into());
        assert_eq!(err.to_string(), "not found: channel amazon");

        let err = CatalogError::ConstraintViolation("cross-channel parent".into());
        assert_eq!(
            err.to_string(),
            "constraint violation: cross-channel parent"
        );
    }

    #[test]
    fn test_storage_from_sqlx() {
        let err: CatalogError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, CatalogError::Storage(_)));
    }
}
