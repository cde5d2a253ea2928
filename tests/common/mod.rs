#![allow(dead_code)]

use std::str::FromStr;

use anyhow::{Context, Result};
use catalog_api::database::{
    models::{CategoryInput, ProductInput},
    schema, CategoryStore, PgCategoryStore, PgProductStore, ProductStore,
};
use rust_decimal::Decimal;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Connection, PgConnection, PgPool,
};
use uuid::Uuid;

/// A private Postgres schema holding fresh catalog tables for one test.
/// The schema is dropped by `teardown`, or on drop when a test fails first.
pub struct TestDb {
    pub pool: PgPool,
    admin: PgPool,
    url: String,
    schema: String,
    dropped: bool,
}

impl TestDb {
    /// None when DATABASE_URL is not set, so store tests are skipped on
    /// machines without a database.
    pub async fn create() -> Result<Option<Self>> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping Postgres store test");
            return Ok(None);
        };

        let admin = PgPoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .context("failed to connect to DATABASE_URL")?;

        let schema = format!("catalog_test_{}", Uuid::new_v4().simple());
        sqlx::query(&format!("CREATE SCHEMA \"{}\"", schema))
            .execute(&admin)
            .await?;

        let options = PgConnectOptions::from_str(&url)?.options([("search_path", schema.as_str())]);
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        schema::ensure_schema(&pool).await?;

        Ok(Some(Self { pool, admin, url, schema, dropped: false }))
    }

    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn categories(&self) -> PgCategoryStore {
        PgCategoryStore::new(self.pool.clone())
    }

    pub fn products(&self) -> PgProductStore {
        PgProductStore::new(self.pool.clone())
    }

    pub async fn teardown(mut self) -> Result<()> {
        self.pool.close().await;
        sqlx::query(&drop_schema_sql(&self.schema))
            .execute(&self.admin)
            .await?;
        self.admin.close().await;
        self.dropped = true;
        Ok(())
    }
}

fn drop_schema_sql(schema: &str) -> String {
    format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", schema)
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if self.dropped {
            return;
        }

        // The test runtime cannot be blocked on here, so use a fresh one
        let url = self.url.clone();
        let statement = drop_schema_sql(&self.schema);
        let cleanup = std::thread::spawn(move || -> Result<()> {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
            runtime.block_on(async {
                let mut conn = PgConnection::connect(&url).await?;
                sqlx::query(&statement).execute(&mut conn).await?;
                conn.close().await?;
                Ok::<(), anyhow::Error>(())
            })
        });

        match cleanup.join() {
            Ok(Err(e)) => eprintln!("failed to drop test schema {}: {:#}", self.schema, e),
            Err(_) => eprintln!("test schema cleanup panicked for {}", self.schema),
            Ok(Ok(())) => {}
        }
    }
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("valid decimal literal")
}

/// Categories {1, Electronics}, {2, Books} and products
/// {1, 9.99, cat 1, "cables"}, {2, 15.00, cat 1, "running shoes"}, {3, 15.00, cat 2, "novels"}
pub async fn seed(db: &TestDb) -> Result<()> {
    let categories = db.categories();
    categories.create(&CategoryInput::new("Electronics", Some("Gadgets"))).await?;
    categories.create(&CategoryInput::new("Books", None)).await?;

    let products = db.products();
    for (name, price, category_id, sub) in [
        ("USB Cable", "9.99", 1, "cables"),
        ("Trail Runner", "15.00", 1, "running shoes"),
        ("Paperback", "15.00", 2, "novels"),
    ] {
        products
            .create(&ProductInput::new(name, dec(price), category_id).with_sub_category(sub))
            .await?;
    }
    Ok(())
}
