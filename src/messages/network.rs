//! Network messages - communication between App and Network layers

use crate::error::FundsError;
use crate::models::{AccountSnapshot, Credential, DepositOutcome, DepositRequest};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// Read account type, email and balance
    FetchFunds {
        id: u64,
        credential: Credential,
    },
    /// Submit a deposit
    SubmitDeposit {
        id: u64,
        credential: Credential,
        request: DepositRequest,
    },
    /// Abort in-flight requests and stop the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Balance fetch finished
    Funds {
        id: u64,
        result: Result<AccountSnapshot, FundsError>,
        time_ms: u64,
    },
    /// Deposit submission finished
    Deposit {
        id: u64,
        request: DepositRequest,
        result: Result<DepositOutcome, FundsError>,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the operation ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Funds { id, .. } => *id,
            NetworkResponse::Deposit { id, .. } => *id,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            NetworkResponse::Funds { result, .. } => result.is_ok(),
            NetworkResponse::Deposit { result, .. } => result.is_ok(),
        }
    }
}
