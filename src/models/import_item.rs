//! Items delivered by an external import source

use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// One raw item from an import payload
///
/// Sources deliver `{ title, price, category? }`; any other attributes are
/// ignored. `price` becomes the record's amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportItem {
    pub title: String,
    pub price: Amount,
    #[serde(default)]
    pub category: Option<String>,
}

impl ImportItem {
    pub fn new(title: impl Into<String>, price: f64, category: Option<&str>) -> Self {
        Self {
            title: title.into(),
            price: Amount::new(price),
            category: category.map(str::to_string),
        }
    }
}
