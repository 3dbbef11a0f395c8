use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FundsError;

/// Bearer credential entered by the user. Empty means unauthenticated.
#[derive(Clone, Default, PartialEq)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Credential(raw.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw token, or `MissingCredential` when none was entered
    pub fn bearer(&self) -> Result<&str, FundsError> {
        if self.0.is_empty() {
            Err(FundsError::MissingCredential)
        } else {
            Ok(&self.0)
        }
    }
}

// Tokens end up in tracing fields through `?` formatting; keep them out of the log.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

/// Last-known account data. Every field is optional and renders only when present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
}

/// Supported payment modes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentMode {
    /// Net banking, completed on an external gateway
    #[default]
    #[serde(rename = "NB")]
    NetBanking,
}

impl PaymentMode {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMode::NetBanking => "NB",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PaymentMode::NetBanking => "Net Banking",
        }
    }

    /// Whether a deposit in this mode may hand the user over to a payment gateway
    pub fn supports_redirect(&self) -> bool {
        matches!(self, PaymentMode::NetBanking)
    }
}

/// Body of a deposit submission
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DepositRequest {
    pub amount: f64,
    pub mode: PaymentMode,
}

impl DepositRequest {
    /// Validate the raw amount field and build a request for `mode`
    pub fn from_input(raw_amount: &str, mode: PaymentMode) -> Result<Self, FundsError> {
        let amount = parse_amount(raw_amount)?;
        Ok(DepositRequest { amount, mode })
    }
}

/// Parse a user-entered amount. Only finite numbers strictly greater than zero pass.
pub fn parse_amount(raw: &str) -> Result<f64, FundsError> {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(FundsError::InvalidAmount(raw.to_string())),
    }
}

/// Wire shape of the deposit response
#[derive(Clone, Debug, Default, Deserialize)]
struct DepositResponseBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    balance: Option<f64>,
    #[serde(default)]
    data: Option<DepositResponseData>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct DepositResponseData {
    #[serde(default)]
    url: Option<String>,
}

/// Parsed result of a successful deposit submission
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepositOutcome {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub balance: Option<f64>,
    pub redirect_url: Option<String>,
}

impl DepositOutcome {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let wire: DepositResponseBody = serde_json::from_str(body)?;
        Ok(DepositOutcome {
            success: wire.success,
            message: wire.message,
            balance: wire.balance,
            redirect_url: wire.data.and_then(|d| d.url).filter(|u| !u.is_empty()),
        })
    }

    /// Decide which branch this outcome takes for the mode it was submitted with
    pub fn kind(&self, mode: PaymentMode) -> DepositKind {
        match &self.redirect_url {
            Some(url) if mode.supports_redirect() => DepositKind::Redirect { url: url.clone() },
            _ => DepositKind::Direct,
        }
    }
}

/// Deposit branch: finish on a gateway, or already credited
#[derive(Clone, Debug, PartialEq)]
pub enum DepositKind {
    Redirect { url: String },
    Direct,
}

/// Format an amount the way it was understood (50 -> "50", 12.5 -> "12.5")
pub fn format_amount(amount: f64) -> String {
    format!("{}", amount)
}
