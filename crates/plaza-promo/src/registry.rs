//! Promo registry: validation, redemption, loyalty issuance.
//!
//! The registry owns the live code table. Validation is read-only and never
//! increments a counter; redemption is a separate explicit operation that
//! checks the limit and increments under the write lock in one step, so
//! `used_count` can never pass `usage_limit` under concurrent redemptions.

use chrono::{Duration, Utc};
use plaza_core::constants::LOYALTY_CODE_VALIDITY_DAYS;
use plaza_core::{CategoryRule, DiscountKind, OrderContext, PromoCode, PromoValidation};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Redemption errors
#[derive(Debug, thiserror::Error)]
pub enum PromoError {
    #[error("Unknown promo code: {0}")]
    UnknownCode(String),

    #[error("Promo code {0} has reached its usage limit")]
    LimitReached(String),
}

/// In-memory promo code table keyed by upper-cased code string.
pub struct PromoRegistry {
    codes: RwLock<HashMap<String, PromoCode>>,
}

impl Default for PromoRegistry {
    fn default() -> Self {
        Self::new(crate::catalog::seed_catalog())
    }
}

impl PromoRegistry {
    pub fn new(seed: Vec<PromoCode>) -> Self {
        let codes = seed
            .into_iter()
            .map(|code| (code.code.to_uppercase(), code))
            .collect();
        Self {
            codes: RwLock::new(codes),
        }
    }

    /// Evaluate a code against an order. The first failing check
    /// short-circuits with a specific message; a valid outcome carries the
    /// clamped discount.
    pub fn validate(&self, input: &str, ctx: &OrderContext) -> PromoValidation {
        if ctx.total_amount <= 0 {
            return PromoValidation::invalid("Order total must be positive");
        }

        let codes = self.codes.read().expect("promo table lock poisoned");

        let Some(code) = codes.get(&input.trim().to_uppercase()) else {
            return PromoValidation::invalid("Unknown promo code");
        };

        if !code.is_active {
            return PromoValidation::invalid("This promo code is no longer active");
        }

        if !code.in_window(Utc::now()) {
            return PromoValidation::invalid("This promo code has expired");
        }

        if !code.under_limit() {
            return PromoValidation::invalid("This promo code has reached its usage limit");
        }

        if let Some(minimum) = code.minimum_amount {
            if ctx.total_amount < minimum {
                return PromoValidation::invalid(format!(
                    "This promo code requires a minimum order of {}",
                    minimum
                ));
            }
        }

        if let Some(eligible) = &code.eligible_service_ids {
            let matches = ctx
                .service_id
                .as_ref()
                .is_some_and(|id| eligible.contains(id));
            if !matches {
                return PromoValidation::invalid("This promo code does not apply to this service");
            }
        }

        match code.category_rule {
            Some(CategoryRule::UrgentOnly) if !ctx.is_urgent => {
                return PromoValidation::invalid(
                    "This promo code is only valid for urgent bookings",
                );
            }
            Some(CategoryRule::GroupOnly) if !ctx.is_group => {
                return PromoValidation::invalid(
                    "This promo code is only valid for group bookings",
                );
            }
            _ => {}
        }

        let discount = Self::compute_discount(code, ctx.total_amount);
        tracing::debug!(code = %code.code, discount, total = ctx.total_amount, "Promo code accepted");
        PromoValidation::valid(
            discount,
            format!("Promo code applied: -{}", discount),
            code.clone(),
        )
    }

    /// Discount for a valid code: percentage kind rounds `total * value /
    /// 100` and honors `max_discount`; both kinds clamp to `[0, total]`.
    fn compute_discount(code: &PromoCode, total_amount: i64) -> i64 {
        let raw = match code.kind {
            DiscountKind::Percentage => {
                (total_amount as f64 * code.value as f64 / 100.0).round() as i64
            }
            DiscountKind::Fixed => code.value,
        };

        let capped = match (code.kind, code.max_discount) {
            (DiscountKind::Percentage, Some(cap)) => raw.min(cap),
            _ => raw,
        };

        // min/max instead of clamp: must not panic on hostile totals
        capped.max(0).min(total_amount.max(0))
    }

    /// Mark a code as used. Callers invoke this after committing the order;
    /// validation never increments. Check-and-increment happens in one step
    /// under the write lock.
    pub fn redeem(&self, input: &str) -> Result<(), PromoError> {
        let mut codes = self.codes.write().expect("promo table lock poisoned");

        let key = input.trim().to_uppercase();
        let code = codes
            .get_mut(&key)
            .ok_or_else(|| PromoError::UnknownCode(key.clone()))?;

        if !code.under_limit() {
            return Err(PromoError::LimitReached(key));
        }

        code.used_count += 1;
        tracing::info!(code = %code.code, used_count = code.used_count, "Promo code redeemed");
        Ok(())
    }

    /// Codes currently redeemable: active, inside their window, under their
    /// usage limit. For display.
    pub fn available(&self) -> Vec<PromoCode> {
        let now = Utc::now();
        let codes = self.codes.read().expect("promo table lock poisoned");
        codes
            .values()
            .filter(|c| c.is_active && c.in_window(now) && c.under_limit())
            .cloned()
            .collect()
    }

    /// Slug for loyalty codes: hash of the whole user id, so distinct ids
    /// never share a code even when their prefixes match.
    fn loyalty_slug(user_id: &str) -> String {
        use std::hash::{Hash, Hasher};

        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        user_id.hash(&mut hasher);
        format!("{:08X}", hasher.finish() & 0xFFFF_FFFF)
    }

    /// Issue a loyalty code for a client, derived deterministically from the
    /// user id. Two tiers: 10 or more completed bookings earn 10%, 5 or more
    /// earn 5%. Single-use, valid 30 days from issuance. Issuing again for
    /// the same user and tier returns the existing code.
    pub fn issue_loyalty_code(
        &self,
        user_id: &str,
        completed_bookings: u32,
    ) -> Option<PromoCode> {
        let percent: i64 = if completed_bookings >= 10 {
            10
        } else if completed_bookings >= 5 {
            5
        } else {
            return None;
        };

        let code_str = format!("LOYAL{}-{}", percent, Self::loyalty_slug(user_id));

        let mut codes = self.codes.write().expect("promo table lock poisoned");
        if let Some(existing) = codes.get(&code_str) {
            return Some(existing.clone());
        }

        let now = Utc::now();
        let code = PromoCode {
            id: Uuid::new_v4().to_string(),
            code: code_str.clone(),
            kind: DiscountKind::Percentage,
            value: percent,
            valid_from: now,
            valid_until: now + Duration::days(LOYALTY_CODE_VALIDITY_DAYS),
            usage_limit: Some(1),
            used_count: 0,
            is_active: true,
            minimum_amount: None,
            max_discount: None,
            eligible_service_ids: None,
            category_rule: None,
        };

        tracing::info!(code = %code.code, user_id, percent, "Loyalty code issued");
        codes.insert(code_str, code.clone());
        Some(code)
    }
}
