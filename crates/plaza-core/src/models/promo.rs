//! Promo code domain models.
//!
//! Amounts are integer minor units (e.g. cents). Percentage codes carry the
//! percentage in `value`; fixed codes carry the amount directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a promo code discounts an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

/// Category restriction applied by some codes. An order that doesn't match
/// the rule cannot use the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryRule {
    UrgentOnly,
    GroupOnly,
}

/// A discount token with temporal validity, usage cap, and eligibility rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: String,
    /// Matched case-insensitively against user input.
    pub code: String,
    pub kind: DiscountKind,
    /// Percentage (0-100) for `Percentage`, minor units for `Fixed`.
    pub value: i64,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub usage_limit: Option<u32>,
    pub used_count: u32,
    pub is_active: bool,
    pub minimum_amount: Option<i64>,
    /// Cap on the computed discount. Percentage kind only.
    pub max_discount: Option<i64>,
    pub eligible_service_ids: Option<Vec<String>>,
    pub category_rule: Option<CategoryRule>,
}

impl PromoCode {
    /// Whether the code is inside its validity window at `now`.
    pub fn in_window(&self, now: DateTime<Utc>) -> bool {
        now >= self.valid_from && now <= self.valid_until
    }

    /// Whether the usage limit (if any) still has headroom.
    pub fn under_limit(&self) -> bool {
        match self.usage_limit {
            Some(limit) => self.used_count < limit,
            None => true,
        }
    }
}

/// Order context a promo code is evaluated against.
#[derive(Debug, Clone, Default)]
pub struct OrderContext {
    pub total_amount: i64,
    pub service_id: Option<String>,
    pub is_urgent: bool,
    pub is_group: bool,
}

/// Outcome of evaluating a code against an order. Always carries a
/// human-readable message; `discount` is 0 unless `is_valid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoValidation {
    pub is_valid: bool,
    pub discount: i64,
    pub message: String,
    pub promo: Option<PromoCode>,
}

impl PromoValidation {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            discount: 0,
            message: message.into(),
            promo: None,
        }
    }

    pub fn valid(discount: i64, message: impl Into<String>, promo: PromoCode) -> Self {
        Self {
            is_valid: true,
            discount,
            message: message.into(),
            promo: Some(promo),
        }
    }
}
