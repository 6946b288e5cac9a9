use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("A category named '{name}' already exists under {}", parent_label(.parent_id))]
    DuplicateName {
        name: String,
        parent_id: Option<DbId>,
    },

    #[error("No root category found")]
    NoRootFound,

    #[error("Cycle detected in category parent chain at category {category_id}")]
    CycleDetected { category_id: DbId },

    #[error("Category hierarchy exceeds the maximum depth of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn parent_label(parent_id: &Option<DbId>) -> String {
    match parent_id {
        Some(id) => format!("parent {id}"),
        None => "the catalog root".to_string(),
    }
}
