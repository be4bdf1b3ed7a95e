//! Seeded promo catalog.
//!
//! Codes are static configuration loaded at process start; usage counts live
//! in the registry and do not persist across restarts.

use chrono::{TimeZone, Utc};
use plaza_core::{CategoryRule, DiscountKind, PromoCode};

/// The promo codes the platform ships with.
pub fn seed_catalog() -> Vec<PromoCode> {
    let valid_from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let valid_until = Utc.with_ymd_and_hms(2030, 12, 31, 23, 59, 59).unwrap();

    vec![
        PromoCode {
            id: "welcome10".to_string(),
            code: "WELCOME10".to_string(),
            kind: DiscountKind::Percentage,
            value: 10,
            valid_from,
            valid_until,
            usage_limit: Some(1000),
            used_count: 0,
            is_active: true,
            minimum_amount: None,
            max_discount: Some(5000),
            eligible_service_ids: None,
            category_rule: None,
        },
        PromoCode {
            id: "urgent20".to_string(),
            code: "URGENT20".to_string(),
            kind: DiscountKind::Percentage,
            value: 20,
            valid_from,
            valid_until,
            usage_limit: Some(500),
            used_count: 0,
            is_active: true,
            minimum_amount: None,
            max_discount: Some(10000),
            eligible_service_ids: None,
            category_rule: Some(CategoryRule::UrgentOnly),
        },
        PromoCode {
            id: "group15".to_string(),
            code: "GROUP15".to_string(),
            kind: DiscountKind::Percentage,
            value: 15,
            valid_from,
            valid_until,
            usage_limit: Some(500),
            used_count: 0,
            is_active: true,
            minimum_amount: None,
            max_discount: Some(8000),
            eligible_service_ids: None,
            category_rule: Some(CategoryRule::GroupOnly),
        },
        PromoCode {
            id: "fixe2000".to_string(),
            code: "FIXE2000".to_string(),
            kind: DiscountKind::Fixed,
            value: 2000,
            valid_from,
            valid_until,
            usage_limit: Some(2000),
            used_count: 0,
            is_active: true,
            minimum_amount: Some(8000),
            max_discount: None,
            eligible_service_ids: None,
            category_rule: None,
        },
    ]
}
