use async_trait::async_trait;
use makler_core::{Broker, MaklerError, OrderId, OrderSide, TradeOrder};
use rust_decimal::Decimal;

struct BareBroker;

impl Broker for BareBroker {
    fn name(&self) -> &'static str {
        "bare"
    }
}

fn order() -> TradeOrder {
    TradeOrder {
        symbol: "sz150023".into(),
        side: OrderSide::Buy,
        price: Decimal::new(1234, 3),
        amount: Decimal::new(100, 0),
    }
}

fn assert_unsupported(res: Result<impl std::fmt::Debug, MaklerError>, capability: &str) {
    match res {
        Err(MaklerError::Unsupported { capability: cap }) => assert_eq!(cap, capability),
        other => panic!("expected unsupported {capability}, got {other:?}"),
    }
}

#[tokio::test]
async fn every_operation_defaults_to_unsupported() {
    let b = BareBroker;
    let one = Decimal::ONE;

    assert_unsupported(b.place_order(order()).await, "place-order");
    assert_unsupported(b.cancel_order(&OrderId::new("42")).await, "cancel-order");
    assert_unsupported(b.open_orders().await, "open-orders");
    assert_unsupported(b.subscribe_fund("of160119", one).await, "subscribe-fund");
    assert_unsupported(b.redeem_fund("of160119", one).await, "redeem-fund");
    assert_unsupported(b.split_fund("of160119", one).await, "split-fund");
    assert_unsupported(b.merge_fund("of160119", one).await, "merge-fund");
    assert_unsupported(b.ipo_limit().await, "ipo-limit");
    assert_unsupported(b.ipo_list().await, "ipo-list");
    assert_unsupported(b.transfer_in(one, None).await, "transfer-in");
    assert_unsupported(b.transfer_out(one, Some("9501")).await, "transfer-out");
    assert_unsupported(b.portfolio().await, "portfolio");
    assert_unsupported(b.account_ref().await, "account-ref");
}

#[test]
fn key_defaults_to_name() {
    let b = BareBroker;
    assert_eq!(b.key().as_str(), "bare");
    assert_eq!(b.vendor(), "unknown");
}

mod keepalive {
    use super::*;
    use makler_core::{KEEPALIVE_EXTEND_SECS, Keepalive, Position};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingBroker {
        portfolio_calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Broker for CountingBroker {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn portfolio(&self) -> Result<Vec<Position>, MaklerError> {
            self.portfolio_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(MaklerError::transport("connection reset"))
            } else {
                Ok(vec![])
            }
        }
    }

    #[tokio::test]
    async fn first_check_nudges_and_extends() {
        let broker = CountingBroker::default();
        let ka = Keepalive::new();

        assert!(ka.check(&broker, 1000).await.unwrap());
        assert_eq!(broker.portfolio_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ka.expires_at(), 1000 + KEEPALIVE_EXTEND_SECS);
    }

    #[tokio::test]
    async fn check_inside_window_is_a_no_op() {
        let broker = CountingBroker::default();
        let ka = Keepalive::new();

        assert!(ka.check(&broker, 1000).await.unwrap());
        // Well before expiry minus the lead window: no nudge.
        assert!(!ka.check(&broker, 1100).await.unwrap());
        assert_eq!(broker.portfolio_calls.load(Ordering::SeqCst), 1);

        // Inside the 60s lead window again: nudge.
        assert!(ka.check(&broker, 1000 + KEEPALIVE_EXTEND_SECS - 30).await.unwrap());
        assert_eq!(broker.portfolio_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_nudge_leaves_expiry_untouched() {
        let broker = CountingBroker {
            fail: true,
            ..Default::default()
        };
        let ka = Keepalive::new();

        assert!(ka.check(&broker, 1000).await.is_err());
        assert_eq!(ka.expires_at(), 0, "expiry must not advance on failure");
    }
}
