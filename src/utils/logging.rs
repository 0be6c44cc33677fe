//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the CornerClub application.

use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "cornerclub.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log booking workflow steps with structured data
pub fn log_booking_action(user_id: &str, event_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        event_id = event_id,
        action = action,
        details = details,
        "Booking action performed"
    );
}

/// Log payment gateway interactions
pub fn log_payment_event(order_id: &str, event: &str, amount: Option<i64>) {
    info!(
        order_id = order_id,
        event = event,
        amount = amount,
        "Payment event"
    );
}

/// Log a payment that was captured but could not be seated.
///
/// This condition requires manual reconciliation with the gateway and must
/// never be swallowed by the caller.
pub fn log_reconciliation_required(event_id: i64, order_id: &str, payment_id: &str, user_id: &str) {
    error!(
        event_id = event_id,
        order_id = order_id,
        payment_id = payment_id,
        user_id = user_id,
        reconciliation_required = true,
        "Payment captured but capacity admission failed; manual reconciliation required"
    );
}

/// Log admin actions
pub fn log_admin_action(admin_id: &str, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log chat channel activity
pub fn log_chat_event(channel_id: &str, sender_id: &str, event: &str) {
    debug!(
        channel_id = channel_id,
        sender_id = sender_id,
        event = event,
        "Chat event"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
