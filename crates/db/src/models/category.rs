//! Category entity model and DTOs.
//!
//! Categories form a forest through a nullable `parent_id`. The column has no
//! foreign key, so a child can outlive its parent.

use serde::Serialize;
use sqlx::FromRow;
use vendora_core::catalog::CatalogEntry;
use vendora_core::types::{DbId, Patch, Price, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub sequence: i32,
    pub price: Option<Price>,
    pub image_url: Option<String>,
    pub terms: Option<String>,
    pub visible_to_user: bool,
    pub visible_to_vendor: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CatalogEntry for Category {
    fn id(&self) -> DbId {
        self.id
    }
    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn default_price(&self) -> Option<Price> {
        self.price
    }
    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
    fn terms(&self) -> Option<&str> {
        self.terms.as_deref()
    }
    fn visible_to_user(&self) -> bool {
        self.visible_to_user
    }
    fn visible_to_vendor(&self) -> bool {
        self.visible_to_vendor
    }
}

/// Validated input for inserting a category. `name` is already trimmed.
#[derive(Debug, Clone, Default)]
pub struct CreateCategory {
    pub name: String,
    pub parent_id: Option<DbId>,
    pub sequence: Option<i32>,
    pub price: Option<Price>,
    pub image_url: Option<String>,
    pub terms: Option<String>,
    pub visible_to_user: Option<bool>,
    pub visible_to_vendor: Option<bool>,
}

impl CreateCategory {
    pub fn named(name: impl Into<String>, parent_id: Option<DbId>) -> Self {
        Self {
            name: name.into(),
            parent_id,
            ..Self::default()
        }
    }
}

/// Validated partial update. `parent_id` is immutable and absent here.
///
/// Nullable columns use [`Patch`] so that "leave alone" and "clear" are
/// distinct; the others are plain `Option`s merged with `COALESCE`.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub sequence: Option<i32>,
    pub price: Patch<Price>,
    pub image_url: Patch<String>,
    pub terms: Patch<String>,
    pub visible_to_user: Option<bool>,
    pub visible_to_vendor: Option<bool>,
}
