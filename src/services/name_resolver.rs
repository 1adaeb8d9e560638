use alloy::primitives::Address;
use thiserror::Error;

use crate::ens::EnsClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Invalid address or ENS name")]
    InvalidAddressOrName,
}

/// Outcome of resolving user input. On failure `address` holds the trimmed
/// input so it can be echoed back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub address: String,
    pub error: Option<ResolveError>,
}

impl Resolution {
    fn resolved(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            error: None,
        }
    }

    fn failed(input: &str) -> Self {
        Self {
            address: input.to_string(),
            error: Some(ResolveError::InvalidAddressOrName),
        }
    }

    /// True for blank input, which callers treat as "no query".
    pub fn is_empty(&self) -> bool {
        self.address.is_empty()
    }
}

/// `0x` followed by 40 hex digits. All-lowercase is accepted as is; any
/// uppercase letter means the input must carry a valid EIP-55 checksum.
pub fn is_address(input: &str) -> bool {
    let Some(hex) = input.strip_prefix("0x") else {
        return false;
    };
    if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }
    if !hex.bytes().any(|b| b.is_ascii_uppercase()) {
        return true;
    }
    Address::parse_checksummed(input, None).is_ok()
}

/// Turns an address-or-ENS-name into a canonical address.
#[derive(Debug, Clone)]
pub struct NameResolver {
    ens: EnsClient,
}

impl NameResolver {
    pub fn new(ens: EnsClient) -> Self {
        Self { ens }
    }

    pub async fn resolve(&self, input: &str) -> Resolution {
        let input = input.trim();

        if input.is_empty() {
            return Resolution::resolved("");
        }

        if is_address(input) {
            return Resolution::resolved(input);
        }

        match self.ens.lookup(input).await {
            Ok(Some(record)) => match record.address {
                Some(address) if is_address(&address) => {
                    tracing::debug!(name = input, %address, "ENS name resolved");
                    Resolution::resolved(address)
                }
                _ => {
                    tracing::info!(name = input, "ENS record has no usable address");
                    Resolution::failed(input)
                }
            },
            Ok(None) => {
                tracing::info!(name = input, "ENS name not found");
                Resolution::failed(input)
            }
            Err(e) => {
                tracing::error!(name = input, error = %e, "Error resolving ENS name");
                Resolution::failed(input)
            }
        }
    }
}
