//! Trade contracts between named parties

use serde::{Deserialize, Serialize};

use crate::core::types::ResourceKind;

/// A standing agreement to deliver a resource at a fixed price.
///
/// Recurring contracts re-price at the then-current market rate on
/// expiry and run for a fresh renewal window; one-shot contracts are
/// simply removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeContract {
    pub resource: ResourceKind,
    pub quantity: f32,
    pub price_per_unit: f32,
    pub seller_id: String,
    pub buyer_id: String,
    /// Days left before expiry or renewal
    pub duration_days: f32,
    pub is_recurring: bool,
}

impl TradeContract {
    pub fn new(
        resource: ResourceKind,
        quantity: f32,
        price_per_unit: f32,
        seller_id: impl Into<String>,
        buyer_id: impl Into<String>,
        duration_days: f32,
    ) -> Self {
        Self {
            resource,
            quantity,
            price_per_unit,
            seller_id: seller_id.into(),
            buyer_id: buyer_id.into(),
            duration_days,
            is_recurring: false,
        }
    }

    pub fn recurring(mut self) -> Self {
        self.is_recurring = true;
        self
    }
}
