//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// Default origin + path prefix of the funds API
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Delay between the "redirecting" notice and opening the payment gateway
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Delay between a direct deposit confirmation and the balance refetch
pub const REFETCH_DELAY: Duration = Duration::from_millis(2000);

/// Application name
pub const APP_NAME: &str = "Funds Desk";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// Status messages shown to the user

pub const MSG_MISSING_TOKEN: &str = "Please enter your Bearer token first";
pub const MSG_INVALID_AMOUNT: &str = "Please enter a valid amount greater than 0";
pub const MSG_FETCH_FAILED: &str = "Failed to fetch balance: ";
pub const MSG_DEPOSIT_FAILED: &str = "Deposit failed: ";
pub const MSG_REDIRECTING: &str = "Redirecting to payment gateway...";
pub const MSG_GATEWAY_OPENED: &str =
    "Payment gateway opened in a new window. Complete the payment there.";
