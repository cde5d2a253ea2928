use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::error::{StoreError, StoreResult};
use super::models::{Category, CategoryInput};

const ENTITY: &str = "Category";

/// CRUD contract over category records
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Every category, ordered by id ascending
    async fn list_all(&self) -> StoreResult<Vec<Category>>;

    async fn get_by_id(&self, category_id: i32) -> StoreResult<Category>;

    /// Insert and return the row with its store-assigned id
    async fn create(&self, category: &CategoryInput) -> StoreResult<Category>;

    /// Replace every mutable field of an existing row. The returned record
    /// always carries `category_id`.
    async fn update(&self, category_id: i32, category: &CategoryInput) -> StoreResult<Category>;

    async fn delete(&self, category_id: i32) -> StoreResult<()>;
}

pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn list_all(&self) -> StoreResult<Vec<Category>> {
        let mut conn = self.pool.acquire().await?;

        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, name, description
            FROM categories
            ORDER BY category_id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        debug!("Listed {} categories", categories.len());
        Ok(categories)
    }

    async fn get_by_id(&self, category_id: i32) -> StoreResult<Category> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, name, description
            FROM categories
            WHERE category_id = $1
            "#,
        )
        .bind(category_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| StoreError::not_found(ENTITY, category_id))
    }

    async fn create(&self, category: &CategoryInput) -> StoreResult<Category> {
        let mut conn = self.pool.acquire().await?;

        // A missing RETURNING row surfaces as RowNotFound, i.e. a persistence fault
        let created = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING category_id, name, description
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .fetch_one(&mut *conn)
        .await?;

        debug!("Created category {}", created.category_id);
        Ok(created)
    }

    async fn update(&self, category_id: i32, category: &CategoryInput) -> StoreResult<Category> {
        let mut conn = self.pool.acquire().await?;

        let updated = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1, description = $2
            WHERE category_id = $3
            RETURNING category_id, name, description
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| StoreError::not_found(ENTITY, category_id))?;

        debug!("Updated category {}", category_id);
        Ok(updated)
    }

    async fn delete(&self, category_id: i32) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(category_id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(ENTITY, category_id));
        }

        debug!("Deleted category {}", category_id);
        Ok(())
    }
}
