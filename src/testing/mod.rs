use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::AppState;
use crate::auth::{generate_jwt, AuthSettings, Claims};
use crate::database::models::{Category, CategoryInput, Product, ProductInput};
use crate::database::{CategoryStore, ProductStore, StoreError, StoreResult};
use crate::filter::ProductFilter;

pub const TEST_SECRET: &str = "catalog-test-secret";

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    next_category_id: i32,
    next_product_id: i32,
}

/// In-memory stand-in for both Postgres stores, used to drive the router
/// without a database. `failing()` turns every call into a persistence fault.
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    tables: Arc<Mutex<Tables>>,
    fail: bool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn state(&self) -> AppState {
        AppState {
            categories: Arc::new(self.clone()),
            products: Arc::new(self.clone()),
            auth: AuthSettings::new(TEST_SECRET, "ADMIN"),
            database: None,
        }
    }

    fn tables(&self) -> StoreResult<std::sync::MutexGuard<'_, Tables>> {
        if self.fail {
            return Err(StoreError::Persistence(sqlx::Error::PoolTimedOut));
        }
        Ok(self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }
}

pub fn bearer(role: &str) -> String {
    let token = generate_jwt(&Claims::new("tester", role, 1), TEST_SECRET).unwrap();
    format!("Bearer {}", token)
}

#[async_trait]
impl CategoryStore for MemoryCatalog {
    async fn list_all(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables()?.categories.values().cloned().collect())
    }

    async fn get_by_id(&self, category_id: i32) -> StoreResult<Category> {
        self.tables()?
            .categories
            .get(&category_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Category", category_id))
    }

    async fn create(&self, category: &CategoryInput) -> StoreResult<Category> {
        let mut tables = self.tables()?;
        tables.next_category_id += 1;
        let created = category.clone().into_category(tables.next_category_id);
        tables.categories.insert(created.category_id, created.clone());
        Ok(created)
    }

    async fn update(&self, category_id: i32, category: &CategoryInput) -> StoreResult<Category> {
        let mut tables = self.tables()?;
        let slot = tables
            .categories
            .get_mut(&category_id)
            .ok_or_else(|| StoreError::not_found("Category", category_id))?;
        *slot = category.clone().into_category(category_id);
        Ok(slot.clone())
    }

    async fn delete(&self, category_id: i32) -> StoreResult<()> {
        self.tables()?
            .categories
            .remove(&category_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Category", category_id))
    }
}

#[async_trait]
impl ProductStore for MemoryCatalog {
    async fn search(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        let term = filter.sub_category_term();
        Ok(self
            .tables()?
            .products
            .values()
            .filter(|p| filter.category_id.map_or(true, |id| p.category_id == id))
            .filter(|p| filter.min_price.map_or(true, |min| p.price >= min))
            .filter(|p| filter.max_price.map_or(true, |max| p.price <= max))
            .filter(|p| {
                term.map_or(true, |t| p.sub_category.as_deref().is_some_and(|s| s.contains(t)))
            })
            .cloned()
            .collect())
    }

    async fn list_by_category_id(&self, category_id: i32) -> StoreResult<Vec<Product>> {
        self.search(&ProductFilter::new().category(category_id)).await
    }

    async fn get_by_id(&self, product_id: i32) -> StoreResult<Product> {
        self.tables()?
            .products
            .get(&product_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Product", product_id))
    }

    async fn create(&self, product: &ProductInput) -> StoreResult<Product> {
        let mut tables = self.tables()?;
        tables.next_product_id += 1;
        let created = product.clone().into_product(tables.next_product_id);
        tables.products.insert(created.product_id, created.clone());
        Ok(created)
    }

    async fn update(&self, product_id: i32, product: &ProductInput) -> StoreResult<Product> {
        let mut tables = self.tables()?;
        let slot = tables
            .products
            .get_mut(&product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;
        *slot = product.clone().into_product(product_id);
        Ok(slot.clone())
    }

    async fn delete(&self, product_id: i32) -> StoreResult<()> {
        self.tables()?
            .products
            .remove(&product_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Product", product_id))
    }
}
