use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::FieldErrors;

/// A persisted category row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Mutable category fields accepted on create and update.
///
/// There is deliberately no identifier here: the store assigns it on create
/// and the request path supplies it on update. A `categoryId` sent in a JSON
/// body is silently dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "This field is required".to_string());
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Attach a store-assigned identifier
    pub fn into_category(self, category_id: i32) -> Category {
        Category {
            category_id,
            name: self.name,
            description: self.description,
        }
    }
}
