//! Booking workflow service implementation
//!
//! Orchestrates the booking state machine: profile check, payment order
//! creation, callback verification, capacity admission, and booking record
//! creation. Capacity is only ever advanced through the booking
//! repository's conditional update, so the no-oversell invariant holds for
//! free and paid bookings alike.

use tracing::{info, warn};

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::middleware::auth::AuthContext;
use crate::models::booking::{Booking, BookingState, CreateBookingRequest, PaymentConfirmation};
use crate::models::event::{Event, EventStatus};
use crate::services::payment::{PaymentGateway, PaymentOrder};
use crate::services::profile::ProfileService;
use crate::utils::errors::{CornerClubError, PaymentError, Result};
use crate::utils::logging;

/// Outcome of starting a booking
#[derive(Debug, Clone)]
pub enum BookingIntent {
    /// Free event: the seat was committed immediately
    Committed(Booking),
    /// Paid event: the client must complete checkout with this order and
    /// come back through the payment callback
    OrderCreated(PaymentOrder),
}

#[derive(Clone)]
pub struct BookingService {
    db: DatabaseService,
    profiles: ProfileService,
    payment: PaymentGateway,
    settings: Settings,
}

impl BookingService {
    pub fn new(
        db: DatabaseService,
        profiles: ProfileService,
        payment: PaymentGateway,
        settings: Settings,
    ) -> Self {
        Self {
            db,
            profiles,
            payment,
            settings,
        }
    }

    /// Start a booking: validate the caller's profile and either commit a
    /// free seat or create a payment order for checkout.
    pub async fn start(
        &self,
        ctx: &AuthContext,
        event_id: i64,
        quantity: i32,
    ) -> Result<BookingIntent> {
        let mut state = BookingState::Initiated;
        logging::log_booking_action(&ctx.user_id, event_id, "start", None);

        if quantity <= 0 {
            return Err(CornerClubError::InvalidInput(
                "Booking quantity must be positive".to_string(),
            ));
        }

        self.profiles.require_complete(&ctx.user_id).await?;
        state = self.advance(state, BookingState::ProfileChecked, ctx, event_id)?;

        let event = self.db.require_event(event_id).await?;
        validate_bookable(&event, quantity)?;

        if event.is_free() {
            let booking = self
                .admit_and_record(ctx, &event, quantity, 0, None)
                .await?;
            self.advance(state, BookingState::CapacityAdmitted, ctx, event_id)?;
            return Ok(BookingIntent::Committed(booking));
        }

        if !self.payment.is_enabled() {
            return Err(CornerClubError::ServiceUnavailable(
                "Payments are currently disabled".to_string(),
            ));
        }

        let amount = event.price * quantity as i64;
        let order = self.payment.create_order(amount).await?;
        self.advance(state, BookingState::OrderCreated, ctx, event_id)?;

        logging::log_payment_event(&order.id, "order_created", Some(amount));

        Ok(BookingIntent::OrderCreated(order))
    }

    /// Complete a paid booking from a gateway callback.
    ///
    /// The signature is verified before any ledger mutation. A replayed
    /// callback with a known `(order_id, payment_id)` pair returns the
    /// existing booking instead of creating a second one.
    pub async fn confirm(
        &self,
        ctx: &AuthContext,
        event_id: i64,
        quantity: i32,
        confirmation: PaymentConfirmation,
    ) -> Result<Booking> {
        if quantity <= 0 {
            return Err(CornerClubError::InvalidInput(
                "Booking quantity must be positive".to_string(),
            ));
        }

        if let Some(existing) = self
            .db
            .bookings
            .find_by_payment(&confirmation.order_id, &confirmation.payment_id)
            .await?
        {
            info!(
                booking_id = existing.id,
                order_id = %confirmation.order_id,
                "Duplicate payment callback; returning existing booking"
            );
            return Ok(existing);
        }

        self.payment
            .verify(
                &confirmation.order_id,
                &confirmation.payment_id,
                &confirmation.signature,
            )
            .map_err(|e| match e {
                PaymentError::InvalidSignature => CornerClubError::VerificationFailed {
                    order_id: confirmation.order_id.clone(),
                },
                other => CornerClubError::Payment(other),
            })?;

        logging::log_payment_event(&confirmation.order_id, "payment_verified", None);

        let event = self.db.require_event(event_id).await?;
        let total_price = event.price * quantity as i64;

        match self
            .admit_and_record(ctx, &event, quantity, total_price, Some(&confirmation))
            .await
        {
            Ok(booking) => Ok(booking),
            Err(CornerClubError::SoldOut { event_id }) => {
                // Money collected, no seat. This cannot be resolved here;
                // flag it for manual reconciliation with the gateway.
                logging::log_reconciliation_required(
                    event_id,
                    &confirmation.order_id,
                    &confirmation.payment_id,
                    &ctx.user_id,
                );
                Err(CornerClubError::ReconciliationRequired {
                    event_id,
                    order_id: confirmation.order_id,
                    payment_id: confirmation.payment_id,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Single entry point used by the HTTP handler: free bookings carry no
    /// payment confirmation, paid bookings must.
    pub async fn book(&self, ctx: &AuthContext, request: CreateBookingRequest) -> Result<Booking> {
        self.profiles.require_complete(&ctx.user_id).await?;

        match request.payment {
            Some(confirmation) => {
                self.confirm(ctx, request.event_id, request.quantity, confirmation)
                    .await
            }
            None => {
                let event = self.db.require_event(request.event_id).await?;
                if !event.is_free() {
                    // Invariant: a paid booking is never recorded without a
                    // verified payment confirmation.
                    return Err(CornerClubError::InvalidInput(
                        "Payment confirmation is required for paid events".to_string(),
                    ));
                }

                validate_bookable(&event, request.quantity)?;
                self.admit_and_record(ctx, &event, request.quantity, 0, None)
                    .await
            }
        }
    }

    /// A user's booking history page
    pub async fn user_bookings(
        &self,
        user_id: &str,
        cursor: Option<crate::models::booking::BookingCursor>,
    ) -> Result<crate::models::booking::BookingPage> {
        self.db
            .bookings
            .list_for_user(user_id, cursor, self.settings.catalog.page_size)
            .await
    }

    /// Attendee roster, restricted to the event creator
    pub async fn attendee_roster(&self, ctx: &AuthContext, event_id: i64) -> Result<Vec<Booking>> {
        let event = self.db.require_event(event_id).await?;

        if event.creator_id != ctx.user_id && !ctx.is_admin {
            return Err(CornerClubError::PermissionDenied(
                "Only the event creator can view the attendee roster".to_string(),
            ));
        }

        self.db.bookings.list_for_event(event_id).await
    }

    async fn admit_and_record(
        &self,
        ctx: &AuthContext,
        event: &Event,
        quantity: i32,
        total_price: i64,
        confirmation: Option<&PaymentConfirmation>,
    ) -> Result<Booking> {
        let result = self
            .db
            .bookings
            .create_admitted(event.id, &ctx.user_id, quantity, total_price, confirmation)
            .await;

        match result {
            Ok(booking) => {
                logging::log_booking_action(
                    &ctx.user_id,
                    event.id,
                    "recorded",
                    Some(&format!("quantity={}", quantity)),
                );
                Ok(booking)
            }
            Err(CornerClubError::Database(e)) if is_unique_violation(&e) => {
                // Two callbacks for the same payment raced past the lookup;
                // the first one won, return its booking.
                if let Some(confirmation) = confirmation {
                    if let Some(existing) = self
                        .db
                        .bookings
                        .find_by_payment(&confirmation.order_id, &confirmation.payment_id)
                        .await?
                    {
                        return Ok(existing);
                    }
                }
                Err(CornerClubError::Database(e))
            }
            Err(e) => {
                warn!(
                    user_id = %ctx.user_id,
                    event_id = event.id,
                    error = %e,
                    "Capacity admission failed"
                );
                Err(e)
            }
        }
    }

    fn advance(
        &self,
        from: BookingState,
        to: BookingState,
        ctx: &AuthContext,
        event_id: i64,
    ) -> Result<BookingState> {
        if !from.can_transition_to(to) {
            return Err(CornerClubError::InvalidInput(format!(
                "Invalid booking state transition: {} -> {}",
                from, to
            )));
        }

        logging::log_booking_action(&ctx.user_id, event_id, &to.to_string(), None);
        Ok(to)
    }
}

/// Pre-checks shared by the free and paid paths. The capacity check here is
/// advisory only; the authoritative check happens inside the admission
/// transaction.
fn validate_bookable(event: &Event, quantity: i32) -> Result<()> {
    if event.status != EventStatus::Approved.as_str() {
        return Err(CornerClubError::InvalidInput(format!(
            "Event {} is not open for booking",
            event.id
        )));
    }

    if event.seats_left() < quantity {
        return Err(CornerClubError::SoldOut { event_id: event.id });
    }

    Ok(())
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error.as_database_error().map(|db| db.kind()),
        Some(sqlx::error::ErrorKind::UniqueViolation)
    )
}
