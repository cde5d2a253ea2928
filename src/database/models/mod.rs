pub mod category;
pub mod product;

pub use category::{Category, CategoryInput};
pub use product::{Product, ProductInput};

use std::collections::HashMap;

/// Field name -> human readable problem, as reported back to API clients
pub type FieldErrors = HashMap<String, String>;
