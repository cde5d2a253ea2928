use async_trait::async_trait;
use sqlx::{postgres::PgArguments, query::QueryAs, PgPool, Postgres};
use tracing::debug;

use super::error::{StoreError, StoreResult};
use super::models::{Product, ProductInput};
use crate::filter::{product_filter::PRODUCT_COLUMNS, ProductFilter, SqlParam};

const ENTITY: &str = "Product";

/// CRUD contract over product records plus filtered search
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Products matching every present criterion, ordered by id.
    /// An empty match is an empty list, never an error.
    async fn search(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>>;

    async fn list_all(&self) -> StoreResult<Vec<Product>> {
        self.search(&ProductFilter::default()).await
    }

    /// Products in one category; empty when none match (including unknown categories)
    async fn list_by_category_id(&self, category_id: i32) -> StoreResult<Vec<Product>>;

    async fn get_by_id(&self, product_id: i32) -> StoreResult<Product>;

    async fn create(&self, product: &ProductInput) -> StoreResult<Product>;

    async fn update(&self, product_id: i32, product: &ProductInput) -> StoreResult<Product>;

    async fn delete(&self, product_id: i32) -> StoreResult<()>;
}

pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn search(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        let sql = filter.to_sql();
        debug_assert_eq!(sql.params.len(), filter.len());

        let mut q = sqlx::query_as::<_, Product>(&sql.query);
        for p in sql.params.iter() {
            q = bind_param(q, p);
        }

        let mut conn = self.pool.acquire().await?;
        let products = q.fetch_all(&mut *conn).await?;

        debug!(
            "Product search with {} condition(s) returned {} row(s)",
            sql.params.len(),
            products.len()
        );
        Ok(products)
    }

    async fn list_by_category_id(&self, category_id: i32) -> StoreResult<Vec<Product>> {
        let mut conn = self.pool.acquire().await?;

        let query = format!(
            "SELECT {} FROM products WHERE category_id = $1 ORDER BY product_id",
            PRODUCT_COLUMNS
        );
        let products = sqlx::query_as::<_, Product>(&query)
            .bind(category_id)
            .fetch_all(&mut *conn)
            .await?;

        debug!("Listed {} products for category {}", products.len(), category_id);
        Ok(products)
    }

    async fn get_by_id(&self, product_id: i32) -> StoreResult<Product> {
        let mut conn = self.pool.acquire().await?;

        let query = format!("SELECT {} FROM products WHERE product_id = $1", PRODUCT_COLUMNS);
        sqlx::query_as::<_, Product>(&query)
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, product_id))
    }

    async fn create(&self, product: &ProductInput) -> StoreResult<Product> {
        let mut conn = self.pool.acquire().await?;

        let query = format!(
            r#"
            INSERT INTO products (name, price, category_id, description,
                                  subcategory, image_url, stock, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );
        let created = sqlx::query_as::<_, Product>(&query)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.category_id)
            .bind(&product.description)
            .bind(&product.sub_category)
            .bind(&product.image_url)
            .bind(product.stock)
            .bind(product.featured)
            .fetch_one(&mut *conn)
            .await?;

        debug!("Created product {} in category {}", created.product_id, created.category_id);
        Ok(created)
    }

    async fn update(&self, product_id: i32, product: &ProductInput) -> StoreResult<Product> {
        let mut conn = self.pool.acquire().await?;

        let query = format!(
            r#"
            UPDATE products
            SET name = $1,
                price = $2,
                category_id = $3,
                description = $4,
                subcategory = $5,
                image_url = $6,
                stock = $7,
                featured = $8
            WHERE product_id = $9
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );
        let updated = sqlx::query_as::<_, Product>(&query)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.category_id)
            .bind(&product.description)
            .bind(&product.sub_category)
            .bind(&product.image_url)
            .bind(product.stock)
            .bind(product.featured)
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, product_id))?;

        debug!("Updated product {}", product_id);
        Ok(updated)
    }

    async fn delete(&self, product_id: i32) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(ENTITY, product_id));
        }

        debug!("Deleted product {}", product_id);
        Ok(())
    }
}

fn bind_param<'q>(
    q: QueryAs<'q, Postgres, Product, PgArguments>,
    p: &'q SqlParam,
) -> QueryAs<'q, Postgres, Product, PgArguments> {
    match p {
        SqlParam::Int(i) => q.bind(*i),
        SqlParam::Decimal(d) => q.bind(*d),
        SqlParam::Text(s) => q.bind(s.as_str()),
    }
}
