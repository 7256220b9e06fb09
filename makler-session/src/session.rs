use core::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use makler_core::MaklerError;

use crate::auth::Authenticator;
use crate::transport::{HttpResponse, Method, RequestOptions, Transport};

/// How long a session stays live after a login or a successful request.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(600);

/// Pause inserted by [`Session::reset`] to let in-flight calls settle.
const RESET_PAUSE: Duration = Duration::from_millis(500);

struct State {
    transport: Option<Arc<dyn Transport>>,
    /// `None` means never logged in (or logged out).
    expires_at: Option<Instant>,
}

/// One authenticated, expiring session against a brokerage site.
///
/// Created once per identity by [`crate::SessionRegistry`] and shared for
/// the life of the process. The (handle, expiry) pair is guarded by a
/// per-session async mutex: the lock is held across the
/// check-and-possibly-refresh critical section only, never across a full
/// request round trip, so concurrent calls on a live session proceed
/// against the transport concurrently.
pub struct Session {
    account: String,
    secret: String,
    timeout: Duration,
    authenticator: Arc<dyn Authenticator>,
    state: Mutex<State>,
}

impl Session {
    /// New session with the standard timeout. Prefer obtaining sessions
    /// through [`crate::SessionRegistry::obtain`] so identical credentials
    /// share one instance.
    pub fn new(authenticator: Arc<dyn Authenticator>, account: &str, secret: &str) -> Self {
        Self::with_timeout(authenticator, account, secret, SESSION_TIMEOUT)
    }

    /// New session with a caller-chosen timeout.
    pub fn with_timeout(
        authenticator: Arc<dyn Authenticator>,
        account: &str,
        secret: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            account: account.to_string(),
            secret: secret.to_string(),
            timeout,
            authenticator,
            state: Mutex::new(State {
                transport: None,
                expires_at: None,
            }),
        }
    }

    /// The account this session is bound to.
    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }

    /// The broker kind string of the owning authenticator.
    #[must_use]
    pub fn broker(&self) -> &'static str {
        self.authenticator.broker()
    }

    /// Guarantee a live, authenticated transport and return it.
    ///
    /// Under the session lock: if the expiry has passed (or no login ever
    /// happened), run `pre_login` → `login` → `post_login` and push the
    /// expiry to now + timeout. Exactly one of N concurrent callers
    /// performs the refresh; the rest block on the lock and observe the
    /// refreshed state.
    ///
    /// # Errors
    /// Login-phase failures propagate verbatim and leave the expiry
    /// untouched, so the next call retries the full login.
    pub async fn ensure_active(&self) -> Result<Arc<dyn Transport>, MaklerError> {
        let mut state = self.state.lock().await;
        let now = Instant::now();
        let live = state.transport.is_some() && state.expires_at.is_some_and(|t| now <= t);
        if !live {
            tracing::debug!(broker = self.broker(), "refreshing expired session");
            let transport = self.authenticator.pre_login()?;
            self.authenticator
                .login(transport.as_ref(), &self.account, &self.secret)
                .await?;
            self.authenticator.post_login(transport.as_ref()).await?;
            state.transport = Some(Arc::clone(&transport));
            state.expires_at = Some(now + self.timeout);
            return Ok(transport);
        }
        state
            .transport
            .clone()
            .ok_or_else(|| MaklerError::transport("session transport missing"))
    }

    /// Perform one HTTP call through a guaranteed-live session.
    ///
    /// Refreshes first if needed, issues the call outside the lock, raises
    /// on non-2xx, and on success slides the expiry forward by the timeout
    /// (any successful call extends the session, not just login).
    ///
    /// # Errors
    /// `Login` from a failed refresh, `Transport` from the wire, or
    /// `Status` for a non-success HTTP status.
    pub async fn issue(
        &self,
        method: Method,
        url: &str,
        opts: RequestOptions,
    ) -> Result<HttpResponse, MaklerError> {
        let transport = self.ensure_active().await?;
        let resp = transport.issue(method, url, &opts).await?;
        if !resp.is_success() {
            return Err(MaklerError::status(resp.status, url));
        }
        let mut state = self.state.lock().await;
        state.expires_at = Some(Instant::now() + self.timeout);
        Ok(resp)
    }

    /// `issue` with `GET`.
    pub async fn get(&self, url: &str, opts: RequestOptions) -> Result<HttpResponse, MaklerError> {
        self.issue(Method::GET, url, opts).await
    }

    /// `issue` with `POST`.
    pub async fn post(&self, url: &str, opts: RequestOptions) -> Result<HttpResponse, MaklerError> {
        self.issue(Method::POST, url, opts).await
    }

    /// Drop the transport handle and reset the expiry to "never logged in".
    ///
    /// Takes the session lock, so a logout cannot interleave with a
    /// concurrent refresh.
    pub async fn logout(&self) {
        let mut state = self.state.lock().await;
        state.transport = None;
        state.expires_at = None;
        tracing::debug!(broker = self.broker(), "logged out");
    }

    /// Logout, pause briefly, then log back in.
    ///
    /// # Errors
    /// Whatever the re-login raises.
    pub async fn reset(&self) -> Result<(), MaklerError> {
        self.logout().await;
        tokio::time::sleep(RESET_PAUSE).await;
        self.ensure_active().await.map(|_| ())
    }

    /// Whether the session currently holds a live, unexpired handle.
    pub async fn is_active(&self) -> bool {
        let state = self.state.lock().await;
        state.transport.is_some() && state.expires_at.is_some_and(|t| Instant::now() <= t)
    }

    /// The current expiry instant, if logged in. Test/diagnostic aid.
    pub async fn expires_at(&self) -> Option<Instant> {
        self.state.lock().await.expires_at
    }
}

// The secret never appears in diagnostics.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("broker", &self.broker())
            .field("account", &self.account)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
