//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::Utc;
use uuid::Uuid;

/// Generate a short receipt identifier for payment orders
pub fn generate_receipt() -> String {
    format!("rcpt_{}_{}", Utc::now().timestamp(), Uuid::new_v4().simple())
}

/// Parse an optional filter value, treating the "All" sentinel as no filter
pub fn filter_value(value: Option<&str>) -> Option<String> {
    match value {
        None => None,
        Some(v) if v.is_empty() || v.eq_ignore_ascii_case("all") => None,
        Some(v) => Some(v.to_string()),
    }
}
