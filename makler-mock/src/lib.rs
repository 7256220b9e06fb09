//! Mock broker for CI-safe tests and examples.
//!
//! [`MockBroker`] serves deterministic fixture data for the query
//! operations and keeps placed orders in memory so cancel/open-order flows
//! can be exercised without a brokerage account. Fund subscription and
//! cash transfer operations are deliberately left on their unsupported
//! defaults.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use makler_core::{
    Broker, IpoLimit, IpoListing, MaklerError, OrderId, OrderRecord, OrderStatus, Position,
    TradeOrder,
};

mod fixtures;

pub use fixtures::ACCOUNT_REF;

/// Deterministic in-memory broker.
pub struct MockBroker {
    orders: Mutex<Vec<OrderRecord>>,
    next_id: AtomicU64,
}

impl Default for MockBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBroker {
    /// Fresh broker with no orders on the book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn maybe_fail_or_timeout(symbol: &str, capability: &'static str) -> Result<(), MaklerError> {
        match symbol {
            "FAIL" => Err(MaklerError::transport(format!(
                "forced failure: {capability}"
            ))),
            "TIMEOUT" => {
                // Simulate brief latency; keep short to avoid slowing tests
                std::thread::sleep(std::time::Duration::from_millis(200));
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Broker for MockBroker {
    fn name(&self) -> &'static str {
        "makler-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn place_order(&self, order: TradeOrder) -> Result<OrderId, MaklerError> {
        Self::maybe_fail_or_timeout(&order.symbol, "place-order")?;
        if order.price <= Decimal::ZERO {
            return Err(MaklerError::InvalidArg("order price must be positive".into()));
        }
        if order.amount <= Decimal::ZERO {
            return Err(MaklerError::InvalidArg(
                "order amount must be positive".into(),
            ));
        }
        let order_id = OrderId::new(format!("M{:06}", self.next_id.fetch_add(1, Ordering::SeqCst)));
        let record = OrderRecord {
            order_id: order_id.clone(),
            symbol: order.symbol,
            name: None,
            side: order.side,
            order_price: order.price,
            order_amount: order.amount,
            filled_price: Decimal::ZERO,
            filled_amount: Decimal::ZERO,
            status: OrderStatus::Pending,
            order_time: Some(chrono::Utc::now().format("%H:%M:%S").to_string()),
        };
        self.orders.lock().expect("mutex poisoned").push(record);
        Ok(order_id)
    }

    async fn cancel_order(&self, order_id: &OrderId) -> Result<OrderId, MaklerError> {
        let mut orders = self.orders.lock().expect("mutex poisoned");
        let record = orders
            .iter_mut()
            .find(|r| &r.order_id == order_id)
            .ok_or_else(|| MaklerError::not_found(format!("order {order_id}")))?;
        record.status = OrderStatus::Cancelled;
        Ok(order_id.clone())
    }

    async fn open_orders(&self) -> Result<Vec<OrderRecord>, MaklerError> {
        let orders = self.orders.lock().expect("mutex poisoned");
        Ok(orders
            .iter()
            .filter(|r| {
                matches!(r.status, OrderStatus::Pending | OrderStatus::PartiallyFilled)
            })
            .cloned()
            .collect())
    }

    async fn ipo_limit(&self) -> Result<Vec<IpoLimit>, MaklerError> {
        Ok(fixtures::ipo_limits())
    }

    async fn ipo_list(&self) -> Result<Vec<IpoListing>, MaklerError> {
        Ok(fixtures::ipo_listings())
    }

    async fn portfolio(&self) -> Result<Vec<Position>, MaklerError> {
        Ok(fixtures::positions())
    }

    async fn account_ref(&self) -> Result<String, MaklerError> {
        Ok(fixtures::ACCOUNT_REF.to_string())
    }
}
