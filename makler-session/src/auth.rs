use std::sync::Arc;

use async_trait::async_trait;

use makler_core::MaklerError;

use crate::transport::{HttpTransport, Transport};

/// The login seam a broker adapter supplies to [`crate::Session`].
///
/// The session drives the three phases in order during a refresh:
/// `pre_login` (build or replace the transport handle), `login`
/// (site-specific handshake; must leave the transport holding valid
/// cookies/tokens), `post_login` (optional follow-up, default no-op).
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Stable broker kind string. Part of the session identity, so two
    /// adapters sharing an account string still get distinct sessions.
    fn broker(&self) -> &'static str;

    /// Construct a fresh transport handle for the upcoming login.
    ///
    /// # Errors
    /// `Transport` when the handle cannot be built.
    fn pre_login(&self) -> Result<Arc<dyn Transport>, MaklerError> {
        Ok(Arc::new(HttpTransport::new()?))
    }

    /// Perform the site-specific login handshake against `transport`.
    async fn login(
        &self,
        transport: &dyn Transport,
        account: &str,
        secret: &str,
    ) -> Result<(), MaklerError>;

    /// Optional follow-up once the transport is authenticated.
    async fn post_login(&self, transport: &dyn Transport) -> Result<(), MaklerError> {
        let _ = transport;
        Ok(())
    }
}
