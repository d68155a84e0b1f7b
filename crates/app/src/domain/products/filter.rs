//! Product listing filters built from query parameters.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::products::records::ProductRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid value {value:?} for parameter {parameter}")]
    InvalidParameter { parameter: String, value: String },
}

/// Conjunctive predicate over products. `None` fields are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,

    /// Exact category.
    pub category: Option<String>,

    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    /// Build a filter from `name`, `category`, `minPrice` and `maxPrice`.
    ///
    /// Unknown keys are ignored and empty values count as absent. When a key
    /// repeats, the last value wins.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameter`] for a non-numeric price bound.
    pub fn from_params<I, K, V>(params: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();

        for (key, value) in params {
            let value = value.as_ref().trim();

            if value.is_empty() {
                continue;
            }

            match key.as_ref() {
                "name" => filter.name = Some(value.to_owned()),
                "category" => filter.category = Some(value.to_owned()),
                "minPrice" => filter.min_price = Some(parse_price("minPrice", value)?),
                "maxPrice" => filter.max_price = Some(parse_price("maxPrice", value)?),
                _ => {}
            }
        }

        Ok(filter)
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluate the predicate in memory.
    #[must_use]
    pub fn matches(&self, product: &ProductRecord) -> bool {
        let name_matches = self.name.as_ref().is_none_or(|needle| {
            product
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });

        name_matches
            && self
                .category
                .as_ref()
                .is_none_or(|category| product.category == *category)
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
    }
}

fn parse_price(parameter: &str, value: &str) -> Result<Decimal, FilterError> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| FilterError::InvalidParameter {
            parameter: parameter.to_owned(),
            value: value.to_owned(),
        })
}
