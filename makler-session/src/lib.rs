//! makler-session
//!
//! Expiring authenticated HTTP sessions for brokerage-site adapters.
//!
//! - `transport`: the narrow `Transport` facade (`issue`/`get`/`post` only)
//!   and its default `reqwest`-backed implementation.
//! - `auth`: the `Authenticator` seam adapters implement; the session drives
//!   its `pre_login` / `login` / `post_login` phases.
//! - `session`: the lazily refreshed `Session` with sliding expiration.
//! - `identity`: the content-addressed `SessionRegistry` guaranteeing at
//!   most one live session per (broker kind, account, secret).
//!
//! Sessions are deliberately a facade over the underlying HTTP client:
//! adapters only ever see `issue`/`get`/`post`, never the client's full
//! surface.
#![warn(missing_docs)]

/// The adapter-supplied login seam.
pub mod auth;
/// Identity derivation and the process-wide session registry.
pub mod identity;
/// Session lifecycle: lazy refresh, sliding expiration, logout/reset.
pub mod session;
/// The narrow HTTP transport facade and its default implementation.
pub mod transport;

pub use auth::Authenticator;
pub use identity::{Identity, SessionRegistry};
pub use session::{SESSION_TIMEOUT, Session};
pub use transport::{
    HttpResponse, HttpTransport, Method, REQUEST_TIMEOUT, RequestOptions, Transport,
    standard_headers,
};
