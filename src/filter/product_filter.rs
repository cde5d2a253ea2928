use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};

use super::types::{SqlParam, SqlResult};

pub const PRODUCT_COLUMNS: &str = "product_id, name, price, category_id, description, \
                                   subcategory, image_url, stock, featured";

/// Optional product search criteria. Every absent field leaves the result
/// set unrestricted on that dimension; present fields combine with AND.
/// A query parameter sent with an empty value (`?cat=`) counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(rename = "cat", default, deserialize_with = "blank_as_none")]
    pub category_id: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_price: Option<Decimal>,
    pub sub_category: Option<String>,
}

/// Parse an optional query value, treating empty or blank text as missing
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn min_price(mut self, price: Decimal) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(mut self, price: Decimal) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    /// Sub-category text to match, or None when absent or blank
    pub fn sub_category_term(&self) -> Option<&str> {
        self.sub_category
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// Ordered (condition, bound value) pairs. The order is fixed: category,
    /// minimum price, maximum price, sub-category.
    pub fn conditions(&self) -> Vec<(&'static str, SqlParam)> {
        [
            self.category_id
                .map(|id| ("category_id = ", SqlParam::Int(id))),
            self.min_price
                .map(|price| ("price >= ", SqlParam::Decimal(price))),
            self.max_price
                .map(|price| ("price <= ", SqlParam::Decimal(price))),
            self.sub_category_term()
                .map(|term| ("subcategory LIKE ", SqlParam::Text(contains_pattern(term)))),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Number of conditions this filter contributes
    pub fn len(&self) -> usize {
        self.conditions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the WHERE predicate. Values never enter the text; each
    /// condition gets the next placeholder in sequence.
    pub fn to_where_sql(&self) -> SqlResult {
        let (predicates, params): (Vec<String>, Vec<SqlParam>) = self
            .conditions()
            .into_iter()
            .enumerate()
            .map(|(i, (condition, param))| {
                let placeholder = format!("{}${}", condition, i + 1);
                let predicate = match param {
                    SqlParam::Text(_) => format!("{} ESCAPE '\\'", placeholder),
                    _ => placeholder,
                };
                (predicate, param)
            })
            .unzip();

        let query = std::iter::once("1 = 1".to_string())
            .chain(predicates)
            .collect::<Vec<_>>()
            .join(" AND ");

        SqlResult { query, params }
    }

    /// Full SELECT over products, ordered by id
    pub fn to_sql(&self) -> SqlResult {
        let where_result = self.to_where_sql();
        SqlResult {
            query: format!(
                "SELECT {} FROM products WHERE {} ORDER BY product_id",
                PRODUCT_COLUMNS, where_result.query
            ),
            params: where_result.params,
        }
    }
}

/// LIKE pattern matching `term` anywhere, with LIKE metacharacters in the
/// term itself taken literally
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
