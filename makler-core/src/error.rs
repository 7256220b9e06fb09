use thiserror::Error;

use crate::capability::Capability;

/// Unified error type for the makler workspace.
///
/// This wraps capability mismatches, argument validation errors, login and
/// transport failures, and not-found conditions. Quote-line parse failures
/// never appear here: they are downgraded to sentinel rows by design.
#[derive(Debug, Error)]
pub enum MaklerError {
    /// The requested capability is not implemented by the target broker.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "place-order").
        capability: &'static str,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An adapter's login handshake failed. Expiry is never advanced on this.
    #[error("{broker} login failed: {msg}")]
    Login {
        /// Broker id whose login failed.
        broker: String,
        /// Human-readable failure message.
        msg: String,
    },

    /// A network-level failure (connect, send, receive, timeout).
    #[error("transport error: {msg}")]
    Transport {
        /// Human-readable failure message.
        msg: String,
    },

    /// The remote end answered with a non-success HTTP status.
    #[error("http status {status} for {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The request URL.
        url: String,
    },

    /// A resource could not be found (e.g. an unregistered broker id).
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource.
        what: String,
    },
}

impl MaklerError {
    /// Helper: build an `Unsupported` error for a capability.
    #[must_use]
    pub const fn unsupported(cap: Capability) -> Self {
        Self::Unsupported {
            capability: cap.as_str(),
        }
    }

    /// Helper: build a `Login` error with the broker id and message.
    pub fn login(broker: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Login {
            broker: broker.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Transport` error from any displayable cause.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport { msg: msg.into() }
    }

    /// Helper: build a `Status` error for a non-2xx response.
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}
