/// JSON-RPC error code a Ganache-style node uses for execution failures,
/// reverts included.
const SERVER_ERROR_CODE: i64 = -32000;
/// EIP-1193 code for the user rejecting the request in their wallet.
const USER_REJECTED_CODE: i64 = 4001;
/// Message prefix the node puts in front of a revert reason.
const REVERT_PREFIX: &str = "VM Exception while processing transaction: revert ";

/// Classified wallet/contract failure. Errors are parsed into this shape
/// exactly once, at the provider boundary; call sites match on variants
/// instead of inspecting strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("request rejected by the wallet")]
    Rejected,
    #[error("transaction reverted: {reason}")]
    Reverted { reason: String },
    #[error("network failure: {0}")]
    Network(String),
    #[error("provider error: {0}")]
    Unknown(String),
}

impl ProviderError {
    /// Classify a JSON-RPC error object by code. A revert reason hides
    /// behind a fixed message prefix; if the provider's format changed, the
    /// message is carried through unparsed.
    pub fn classify(code: i64, message: String) -> Self {
        match code {
            USER_REJECTED_CODE => Self::Rejected,
            SERVER_ERROR_CODE => {
                let reason = message
                    .strip_prefix(REVERT_PREFIX)
                    .map(str::to_owned)
                    .unwrap_or(message);
                Self::Reverted { reason }
            }
            _ => Self::Unknown(message),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(value: reqwest::Error) -> Self {
        // A body that fails to decode is a provider misbehaving, not the
        // network dropping the call.
        if value.is_decode() {
            Self::Unknown(value.to_string())
        } else {
            Self::Network(value.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("provider returned neither result nor error")]
    EmptyResponse,
    #[error("wallet returned no accounts")]
    NoAccounts,
    #[error("item count was zero after a confirmed add")]
    MissingNewItem,
}
