//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain.

mod account;
mod promo;
mod upload;

// Re-export all models for convenient imports
pub use account::*;
pub use promo::*;
pub use upload::*;
