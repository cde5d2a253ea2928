pub mod product_filter;
pub mod types;

pub use product_filter::ProductFilter;
pub use types::{SqlParam, SqlResult};
