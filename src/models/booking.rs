//! Booking model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub event_id: i64,
    pub user_id: String,
    pub quantity: i32,
    pub total_price: i64,
    pub payment_order_id: Option<String>,
    pub payment_id: Option<String>,
    pub payment_signature: Option<String>,
    pub status: String,
    pub booked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub event_id: i64,
    pub quantity: i32,
    pub payment: Option<PaymentConfirmation>,
}

/// Signed confirmation delivered by the payment gateway callback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Keyset cursor for a user's booking history, ordered by `(booked_at, id)` descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingCursor {
    pub last_booked_at: DateTime<Utc>,
    pub last_id: i64,
}

/// One page of a user's bookings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    pub has_more: bool,
}

/// Booking workflow states, terminal failures excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    Initiated,
    ProfileChecked,
    OrderCreated,
    PaymentVerified,
    CapacityAdmitted,
    Recorded,
}

impl BookingState {
    /// Whether `next` is a legal successor of this state.
    ///
    /// Free bookings jump from ProfileChecked straight to CapacityAdmitted;
    /// paid bookings go through OrderCreated and PaymentVerified.
    pub fn can_transition_to(&self, next: BookingState) -> bool {
        use BookingState::*;
        matches!(
            (self, next),
            (Initiated, ProfileChecked)
                | (ProfileChecked, OrderCreated)
                | (ProfileChecked, CapacityAdmitted)
                | (OrderCreated, PaymentVerified)
                | (PaymentVerified, CapacityAdmitted)
                | (CapacityAdmitted, Recorded)
        )
    }
}

impl std::fmt::Display for BookingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BookingState::Initiated => "initiated",
            BookingState::ProfileChecked => "profile_checked",
            BookingState::OrderCreated => "order_created",
            BookingState::PaymentVerified => "payment_verified",
            BookingState::CapacityAdmitted => "capacity_admitted",
            BookingState::Recorded => "recorded",
        };
        write!(f, "{}", name)
    }
}
