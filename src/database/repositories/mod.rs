//! Database repositories
//!
//! This module contains repository implementations for data access

pub mod booking;
pub mod chat;
pub mod event;
pub mod favorite;
pub mod user;

pub use booking::BookingRepository;
pub use chat::ChatRepository;
pub use event::EventRepository;
pub use favorite::FavoriteRepository;
pub use user::UserRepository;
