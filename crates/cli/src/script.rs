//! Cart operation scripts.
//!
//! A script is a YAML document listing cart operations in the order a
//! shopper would perform them:
//!
//! ```yaml
//! currency: USD
//! steps:
//!   - add: { productId: p1, name: Bamboo brush, unitPrice: "4.50" }
//!   - addProduct:
//!       id: p2
//!       title: Beeswax wraps
//!       price: "12.00"
//!       imageUrl: /uploads/wraps.jpg
//!       sellerId: s9
//!       createdAt: 2024-03-01T10:00:00Z
//!   - update: { productId: p1, quantity: "3" }
//!   - increment: p2
//!   - decrement: p2
//!   - remove: p1
//!   - clear
//! ```
//!
//! Quantities may be written as numbers or as text, the way they arrive from
//! a quantity input box. Text that is not a whole number is rejected rather
//! than guessed at.

use leafcart_cart::CartStore;
use leafcart_core::{CartLineInput, CurrencyCode, Product};
use serde::Deserialize;
use tracing::debug;

use crate::error::CliError;

/// A parsed script.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Display currency; overrides configuration when set.
    #[serde(default)]
    pub currency: Option<CurrencyCode>,
    /// Steps are written as single-key maps (`- add: {...}`), not YAML tags.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

/// One cart operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    /// Add one unit of a product given as a line input.
    Add(CartLineInput),
    /// Add one unit of a product given as a catalog record.
    AddProduct(Box<Product>),
    /// Set a line's quantity.
    #[serde(rename_all = "camelCase")]
    Update {
        product_id: String,
        quantity: QuantityInput,
    },
    /// Raise a line's quantity by one.
    Increment(String),
    /// Lower a line's quantity by one.
    Decrement(String),
    /// Remove a line.
    Remove(String),
    /// Empty the cart.
    Clear,
}

/// A quantity as typed by a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(i64),
    Text(String),
}

impl QuantityInput {
    /// Parse to a whole number, or `None` if the text is not one.
    pub fn parse(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl Script {
    /// Parse a script from YAML.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Yaml` if the document is not a valid script.
    pub fn from_yaml(content: &str) -> Result<Self, CliError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a script from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &std::path::Path) -> Result<Self, CliError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CliError::Read {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_yaml(&content)
    }

    /// Apply every step to the store, stopping at the first invalid one.
    ///
    /// Steps are numbered from 1 in errors.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Step` for a rejected add and
    /// `CliError::InvalidQuantity` for quantity text that is not a number.
    pub fn apply(&self, store: &mut CartStore) -> Result<(), CliError> {
        for (index, step) in self.steps.iter().enumerate() {
            let number = index + 1;
            debug!(step = number, ?step, "Applying step");
            apply_step(store, step).map_err(|e| match e {
                StepError::Cart(source) => CliError::Step {
                    step: number,
                    source,
                },
                StepError::Quantity(value) => CliError::InvalidQuantity {
                    step: number,
                    value,
                },
            })?;
        }
        Ok(())
    }
}

enum StepError {
    Cart(leafcart_cart::CartError),
    Quantity(String),
}

fn apply_step(store: &mut CartStore, step: &Step) -> Result<(), StepError> {
    match step {
        Step::Add(input) => store.add_item(input.clone()).map_err(StepError::Cart)?,
        Step::AddProduct(product) => store
            .add_item(CartLineInput::from(product.as_ref()))
            .map_err(StepError::Cart)?,
        Step::Update {
            product_id,
            quantity,
        } => {
            let value = quantity.parse().ok_or_else(|| {
                StepError::Quantity(match quantity {
                    QuantityInput::Text(text) => text.clone(),
                    QuantityInput::Number(n) => n.to_string(),
                })
            })?;
            store.update_quantity(product_id, value);
        }
        Step::Increment(product_id) => store.increment(product_id),
        Step::Decrement(product_id) => store.decrement(product_id),
        Step::Remove(product_id) => store.remove_item(product_id),
        Step::Clear => store.clear(),
    }
    Ok(())
}
