//! Line item domain model.
//!
//! # Responsibility
//! - Define the canonical cart entry shared by UI and storage.
//! - Validate entries before they enter or leave the cart payload.
//!
//! # Invariants
//! - `id` is non-empty and unique within one cart.
//! - `quantity >= 1` for every stored line item.
//! - `price` is finite and non-negative.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storefront product identifier.
pub type ProductId = String;

/// Product as shown by the catalog, before it enters the cart.
///
/// Incoming payloads may carry a `quantity` field; it is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: f64,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Validates fields shared with [`LineItem`].
    pub fn validate(&self) -> Result<(), LineItemValidationError> {
        validate_id(&self.id)?;
        validate_price(&self.id, self.price)
    }
}

/// One product entry in the cart with its quantity.
///
/// Field names match the JSON payload stored on device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: f64,
    pub quantity: u32,
}

impl LineItem {
    /// Creates the first cart entry for a product, with quantity 1.
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: 1,
        }
    }

    /// Checks line item invariants.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is blank.
    /// - `ZeroQuantity` when `quantity == 0`.
    /// - `InvalidPrice` when `price` is NaN, infinite or negative.
    pub fn validate(&self) -> Result<(), LineItemValidationError> {
        validate_id(&self.id)?;
        validate_price(&self.id, self.price)?;
        if self.quantity == 0 {
            return Err(LineItemValidationError::ZeroQuantity {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Price multiplied by quantity.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Validation failures for products and line items.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItemValidationError {
    EmptyId,
    ZeroQuantity { id: ProductId },
    InvalidPrice { id: ProductId, price: f64 },
    DuplicateId(ProductId),
}

impl Display for LineItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "line item id must not be empty"),
            Self::ZeroQuantity { id } => write!(f, "line item `{id}` has quantity 0"),
            Self::InvalidPrice { id, price } => {
                write!(f, "line item `{id}` has invalid price {price}")
            }
            Self::DuplicateId(id) => write!(f, "line item id `{id}` appears more than once"),
        }
    }
}

impl Error for LineItemValidationError {}

/// Validates a full cart payload: per-item invariants plus id uniqueness.
pub fn validate_items(items: &[LineItem]) -> Result<(), LineItemValidationError> {
    let mut seen = std::collections::HashSet::with_capacity(items.len());
    for item in items {
        item.validate()?;
        if !seen.insert(item.id.as_str()) {
            return Err(LineItemValidationError::DuplicateId(item.id.clone()));
        }
    }
    Ok(())
}

fn validate_id(id: &str) -> Result<(), LineItemValidationError> {
    if id.trim().is_empty() {
        return Err(LineItemValidationError::EmptyId);
    }
    Ok(())
}

fn validate_price(id: &str, price: f64) -> Result<(), LineItemValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(LineItemValidationError::InvalidPrice {
            id: id.to_string(),
            price,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_items, LineItem, LineItemValidationError, Product};

    #[test]
    fn from_product_starts_at_quantity_one() {
        let item = LineItem::from_product(Product::new("a", "Mug", "mug.png", 10.0));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.line_total(), 10.0);
    }

    #[test]
    fn validate_items_rejects_duplicates() {
        let item = LineItem::from_product(Product::new("a", "Mug", "mug.png", 10.0));
        let err = validate_items(&[item.clone(), item]).unwrap_err();
        assert_eq!(err, LineItemValidationError::DuplicateId("a".to_string()));
    }
}
