//! Catalog product records as served by the product catalog service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ProductId, SellerId};
use super::line_item::CartLineInput;
use super::price::Price;

/// Public profile of the seller attached to a product, when the catalog
/// includes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerInfo {
    pub username: String,
}

/// A product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: Price,
    #[serde(default)]
    pub image_url: String,
    pub seller_id: SellerId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub seller: Option<SellerInfo>,
}

impl Product {
    /// The seller reference shown on a cart line: the seller's username when
    /// the catalog embedded it, otherwise the raw seller ID.
    #[must_use]
    pub fn seller_ref(&self) -> &str {
        self.seller
            .as_ref()
            .map_or_else(|| self.seller_id.as_str(), |s| s.username.as_str())
    }
}

impl From<&Product> for CartLineInput {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.as_str().to_owned(),
            name: product.title.clone(),
            unit_price: product.price.amount(),
            image_ref: product.image_url.clone(),
            seller_ref: product.seller_ref().to_owned(),
        }
    }
}
