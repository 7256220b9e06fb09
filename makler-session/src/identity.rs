use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use sha2::{Digest, Sha256};

use makler_core::MaklerError;

use crate::auth::Authenticator;
use crate::session::Session;

static GLOBAL: LazyLock<SessionRegistry> = LazyLock::new(SessionRegistry::new);

/// Content-addressed key for a (broker kind, account, secret) triple.
///
/// Each component is length-framed into a SHA-256 digest, so component
/// boundaries bind: moving a byte from one component to the next changes
/// the key. Identical inputs always derive the identical key, which is
/// what makes the registry a singleton per credential set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity([u8; 32]);

impl Identity {
    /// Derive the identity for a credential triple.
    #[must_use]
    pub fn derive(broker: &str, account: &str, secret: &str) -> Self {
        let mut hasher = Sha256::new();
        for part in [broker, account, secret] {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        Self(hasher.finalize().into())
    }

    /// The raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Process-wide mapping from [`Identity`] to its single live [`Session`].
///
/// Insert-if-absent is atomic under the registry lock, so concurrent
/// `obtain` calls with identical credentials still converge on one
/// session. Sessions are never evicted in normal operation; they live for
/// the life of the process.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Identity, Arc<Session>>>,
}

impl SessionRegistry {
    /// Empty registry. Most callers want [`SessionRegistry::global`];
    /// standalone registries exist for tests.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Return the one session for this credential triple, constructing and
    /// caching it on first use.
    ///
    /// The passed authenticator is only consulted when the session does
    /// not exist yet; an already-cached session keeps the authenticator it
    /// was created with. Login failures never poison the entry: the same
    /// session is returned next time and retries the login.
    ///
    /// # Errors
    /// `InvalidArg` when `account` or `secret` is empty; never cached.
    pub fn obtain(
        &self,
        authenticator: Arc<dyn Authenticator>,
        account: &str,
        secret: &str,
    ) -> Result<Arc<Session>, MaklerError> {
        if account.is_empty() {
            return Err(MaklerError::InvalidArg("account must not be empty".into()));
        }
        if secret.is_empty() {
            return Err(MaklerError::InvalidArg("secret must not be empty".into()));
        }
        let identity = Identity::derive(authenticator.broker(), account, secret);
        let mut sessions = self.sessions.lock().expect("lock poisoned");
        let session = sessions
            .entry(identity)
            .or_insert_with(|| {
                tracing::debug!(broker = authenticator.broker(), "caching new session");
                Arc::new(Session::new(authenticator, account, secret))
            })
            .clone();
        Ok(session)
    }

    /// Number of cached sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().expect("lock poisoned").len()
    }

    /// Whether no session has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
