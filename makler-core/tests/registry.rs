use std::sync::Arc;

use makler_core::{Broker, BrokerRegistry, MaklerError};

struct StubBroker;

impl Broker for StubBroker {
    fn name(&self) -> &'static str {
        "stub"
    }
}

fn register_stub(reg: &BrokerRegistry, ids: &[&str]) {
    reg.register(ids, |account, secret| {
        if account.is_empty() || secret.is_empty() {
            return Err(MaklerError::InvalidArg("empty credentials".into()));
        }
        Ok(Arc::new(StubBroker) as Arc<dyn Broker>)
    });
}

#[test]
fn create_passes_credentials_to_the_constructor() {
    let reg = BrokerRegistry::new();
    register_stub(&reg, &["yjb"]);

    let broker = reg.create("yjb", "123456", "hunter2").unwrap();
    assert_eq!(broker.name(), "stub");
    assert!(matches!(
        reg.create("yjb", "", "hunter2"),
        Err(MaklerError::InvalidArg(_))
    ));
}

#[test]
fn ids_match_case_insensitively() {
    let reg = BrokerRegistry::new();
    register_stub(&reg, &["YJB", "yongjinbao"]);

    assert!(reg.contains("yjb"));
    assert!(reg.contains("Yjb"));
    assert!(reg.contains("YONGJINBAO"));
    assert!(reg.create("yJb", "a", "b").is_ok());
    assert_eq!(reg.ids(), vec!["yjb".to_string(), "yongjinbao".to_string()]);
}

#[test]
fn unknown_id_is_not_found() {
    let reg = BrokerRegistry::new();
    register_stub(&reg, &["yjb"]);

    match reg.create("gf", "a", "b").err() {
        Some(MaklerError::NotFound { what }) => assert!(what.contains("gf")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn constructor_errors_propagate() {
    let reg = BrokerRegistry::new();
    reg.register(&["broken"], |_, _| {
        Err(MaklerError::InvalidArg("no such account".into()))
    });

    assert!(matches!(
        reg.create("broken", "a", "b"),
        Err(MaklerError::InvalidArg(_))
    ));
}
