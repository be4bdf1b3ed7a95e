//! Plaza promo library
//!
//! Promo-code evaluation and redemption: the seeded catalog, the registry
//! holding live usage counts, and loyalty-code issuance.

pub mod catalog;
pub mod registry;

pub use catalog::seed_catalog;
pub use registry::{PromoError, PromoRegistry};
