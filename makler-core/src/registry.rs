use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use crate::broker::Broker;
use crate::error::MaklerError;

/// Constructor closure stored per broker id.
type BrokerCtor = Arc<dyn Fn(&str, &str) -> Result<Arc<dyn Broker>, MaklerError> + Send + Sync>;

static GLOBAL: LazyLock<BrokerRegistry> = LazyLock::new(BrokerRegistry::new);

/// Maps broker-id strings to constructors for concrete [`Broker`] adapters.
///
/// Ids are matched case-insensitively. One constructor may be registered
/// under several ids (a site often has more than one colloquial name).
pub struct BrokerRegistry {
    ctors: RwLock<HashMap<String, BrokerCtor>>,
}

impl BrokerRegistry {
    /// Create an empty registry. Most callers want [`BrokerRegistry::global`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            ctors: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry adapter crates register into.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Register `ctor` under each of `ids`. Later registrations win.
    pub fn register<F>(&self, ids: &[&str], ctor: F)
    where
        F: Fn(&str, &str) -> Result<Arc<dyn Broker>, MaklerError> + Send + Sync + 'static,
    {
        let ctor: BrokerCtor = Arc::new(ctor);
        let mut map = self.ctors.write().expect("lock poisoned");
        for id in ids {
            map.insert(id.to_ascii_lowercase(), Arc::clone(&ctor));
        }
    }

    /// Construct the broker registered under `id` for the given credentials.
    ///
    /// # Errors
    /// `NotFound` when no constructor is registered under `id`; otherwise
    /// whatever the constructor itself returns.
    pub fn create(
        &self,
        id: &str,
        account: &str,
        secret: &str,
    ) -> Result<Arc<dyn Broker>, MaklerError> {
        let ctor = {
            let map = self.ctors.read().expect("lock poisoned");
            map.get(&id.to_ascii_lowercase()).cloned()
        };
        match ctor {
            Some(ctor) => ctor(account, secret),
            None => Err(MaklerError::not_found(format!("broker id {id:?}"))),
        }
    }

    /// Whether a constructor is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ctors
            .read()
            .expect("lock poisoned")
            .contains_key(&id.to_ascii_lowercase())
    }

    /// All registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .ctors
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

impl Default for BrokerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
