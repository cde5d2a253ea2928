use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::FieldErrors;

/// A persisted product row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub price: Decimal,
    pub category_id: i32,
    pub description: Option<String>,
    #[sqlx(rename = "subcategory")]
    pub sub_category: Option<String>,
    pub image_url: Option<String>,
    pub stock: i32,
    pub featured: bool,
}

/// Mutable product fields accepted on create and update (no identifier)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub category_id: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub featured: bool,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: Decimal, category_id: i32) -> Self {
        Self {
            name: name.into(),
            price,
            category_id,
            description: None,
            sub_category: None,
            image_url: None,
            stock: 0,
            featured: false,
        }
    }

    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "This field is required".to_string());
        }
        if self.price < Decimal::ZERO {
            errors.insert("price".to_string(), "Price must not be negative".to_string());
        }
        if self.stock < 0 {
            errors.insert("stock".to_string(), "Stock must not be negative".to_string());
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Attach a store-assigned identifier
    pub fn into_product(self, product_id: i32) -> Product {
        Product {
            product_id,
            name: self.name,
            price: self.price,
            category_id: self.category_id,
            description: self.description,
            sub_category: self.sub_category,
            image_url: self.image_url,
            stock: self.stock,
            featured: self.featured,
        }
    }
}
