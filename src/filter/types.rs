use rust_decimal::Decimal;

/// A value bound to one positional placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i32),
    Decimal(Decimal),
    Text(String),
}

/// A generated statement and the values for its `$1..$n` placeholders, in order
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
