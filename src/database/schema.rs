use sqlx::PgPool;
use tracing::info;

const CREATE_CATEGORIES: &str = r#"
    CREATE TABLE IF NOT EXISTS categories (
        category_id SERIAL PRIMARY KEY,
        name        VARCHAR(50) NOT NULL,
        description TEXT
    )
"#;

const CREATE_PRODUCTS: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        product_id  SERIAL PRIMARY KEY,
        name        VARCHAR(200) NOT NULL,
        price       NUMERIC(10, 2) NOT NULL CHECK (price >= 0),
        category_id INTEGER NOT NULL REFERENCES categories (category_id),
        description TEXT,
        subcategory VARCHAR(50),
        image_url   VARCHAR(200),
        stock       INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
        featured    BOOLEAN NOT NULL DEFAULT FALSE
    )
"#;

const CREATE_PRODUCTS_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS products_category_id_idx ON products (category_id)";

/// Create the catalog tables if they are missing. Safe to run repeatedly.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in [CREATE_CATEGORIES, CREATE_PRODUCTS, CREATE_PRODUCTS_CATEGORY_INDEX] {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Catalog schema is in place");
    Ok(())
}
