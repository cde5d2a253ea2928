use thiserror::Error;

/// Outcome kinds a store operation can fail with.
///
/// `NotFound` is an expected, recoverable result for id-targeted operations.
/// Everything the database itself reports lands in `Persistence`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        StoreError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = StoreError::not_found("Category", 42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Category not found with id: 42");
    }

    #[test]
    fn sqlx_errors_become_persistence() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(!err.is_not_found());
        assert!(matches!(err, StoreError::Persistence(_)));
    }
}
