pub mod category_store;
pub mod error;
pub mod manager;
pub mod models;
pub mod product_store;
pub mod schema;

pub use category_store::{CategoryStore, PgCategoryStore};
pub use error::{StoreError, StoreResult};
pub use manager::{DatabaseError, DatabaseManager};
pub use product_store::{PgProductStore, ProductStore};
