//! Data models
//!
//! Database-backed records and their request companions.

pub mod booking;
pub mod chat;
pub mod event;
pub mod favorite;
pub mod user;

pub use booking::{
    Booking, BookingCursor, BookingPage, BookingState, CreateBookingRequest, PaymentConfirmation,
};
pub use chat::{Channel, ChatMessage, PostMessageRequest};
pub use event::{
    CreateEventRequest, Event, EventCategory, EventCursor, EventFilter, EventPage, EventStatus,
};
pub use favorite::{Favorite, ToggleResult};
pub use user::{UpsertProfileRequest, UserProfile};
