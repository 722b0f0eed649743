use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a request payload could not be turned into a [`CorrelationToken`].
///
/// Every variant is treated the same way by callers: the request carried no usable job id.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("payload is missing")]
    Missing,
    #[error("payload is empty")]
    Empty,
    #[error("payload is not valid utf-8: {0}")]
    Malformed(#[from] std::str::Utf8Error),
}

/// Opaque identifier linking a cancellation request to one running job.
///
/// Tokens are assigned by the dispatcher when a job is submitted.
/// A token is never empty and compares by exact string equality (no trimming, no case folding).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CorrelationToken(String);

impl CorrelationToken {
    /// Decode a raw request payload into a token.
    ///
    /// The payload is interpreted as UTF-8 text.
    pub fn decode(payload: Option<&[u8]>) -> Result<Self, TokenError> {
        let bytes = payload.ok_or(TokenError::Missing)?;
        let text = std::str::from_utf8(bytes)?;
        Self::try_from(text.to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for CorrelationToken {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Self(value))
    }
}

impl FromStr for CorrelationToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl From<CorrelationToken> for String {
    fn from(token: CorrelationToken) -> Self {
        token.0
    }
}

impl AsRef<str> for CorrelationToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CorrelationToken {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CorrelationToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
