use std::sync::Arc;

use async_trait::async_trait;

use makler_core::MaklerError;
use makler_session::{Authenticator, Identity, SessionRegistry, Transport};

struct NamedAuth {
    broker: &'static str,
}

impl NamedAuth {
    fn arc(broker: &'static str) -> Arc<dyn Authenticator> {
        Arc::new(Self { broker })
    }
}

#[async_trait]
impl Authenticator for NamedAuth {
    fn broker(&self) -> &'static str {
        self.broker
    }

    async fn login(
        &self,
        _transport: &dyn Transport,
        _account: &str,
        _secret: &str,
    ) -> Result<(), MaklerError> {
        Ok(())
    }
}

#[test]
fn identity_is_deterministic() {
    let a = Identity::derive("gf", "123456", "hunter2");
    let b = Identity::derive("gf", "123456", "hunter2");
    assert_eq!(a, b);
}

#[test]
fn identity_separates_every_component() {
    let base = Identity::derive("gf", "123456", "hunter2");
    assert_ne!(base, Identity::derive("xq", "123456", "hunter2"));
    assert_ne!(base, Identity::derive("gf", "654321", "hunter2"));
    assert_ne!(base, Identity::derive("gf", "123456", "other"));
    // Component boundaries matter: shifting a byte across them changes the key.
    assert_ne!(
        Identity::derive("gf", "123456", "hunter2"),
        Identity::derive("gf1", "23456", "hunter2")
    );
    assert_ne!(
        Identity::derive("gf", "123456x", "hunter2"),
        Identity::derive("gf", "123456", "xhunter2")
    );
    assert_ne!(
        Identity::derive("gf", "", "hunter2"),
        Identity::derive("", "gf", "hunter2")
    );
}

#[test]
fn same_triple_yields_the_same_session() {
    let registry = SessionRegistry::new();
    let a = registry
        .obtain(NamedAuth::arc("gf"), "123456", "hunter2")
        .unwrap();
    let b = registry
        .obtain(NamedAuth::arc("gf"), "123456", "hunter2")
        .unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(registry.len(), 1);
}

#[test]
fn differing_components_yield_distinct_sessions() {
    let registry = SessionRegistry::new();
    let base = registry
        .obtain(NamedAuth::arc("gf"), "123456", "hunter2")
        .unwrap();

    let other_broker = registry
        .obtain(NamedAuth::arc("xq"), "123456", "hunter2")
        .unwrap();
    let other_account = registry
        .obtain(NamedAuth::arc("gf"), "654321", "hunter2")
        .unwrap();
    let other_secret = registry
        .obtain(NamedAuth::arc("gf"), "123456", "other")
        .unwrap();

    assert!(!Arc::ptr_eq(&base, &other_broker));
    assert!(!Arc::ptr_eq(&base, &other_account));
    assert!(!Arc::ptr_eq(&base, &other_secret));
    assert_eq!(registry.len(), 4);
}

#[test]
fn empty_credentials_are_rejected_and_not_cached() {
    let registry = SessionRegistry::new();

    let err = registry
        .obtain(NamedAuth::arc("gf"), "", "hunter2")
        .unwrap_err();
    assert!(matches!(err, MaklerError::InvalidArg(_)));

    let err = registry
        .obtain(NamedAuth::arc("gf"), "123456", "")
        .unwrap_err();
    assert!(matches!(err, MaklerError::InvalidArg(_)));

    assert!(registry.is_empty());
}

#[test]
fn concurrent_obtains_converge_on_one_session() {
    let registry = Arc::new(SessionRegistry::new());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let registry = Arc::clone(&registry);
        handles.push(std::thread::spawn(move || {
            registry
                .obtain(NamedAuth::arc("gf"), "123456", "hunter2")
                .unwrap()
        }));
    }
    let sessions: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for s in &sessions[1..] {
        assert!(Arc::ptr_eq(&sessions[0], s));
    }
    assert_eq!(registry.len(), 1);
}
