use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::capability::Capability;
use crate::error::MaklerError;
use crate::types::{IpoLimit, IpoListing, OrderId, OrderRecord, Position, TradeOrder};

/// Typed key for identifying brokers in registry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrokerKey(pub &'static str);

impl BrokerKey {
    /// Construct a new typed broker key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<BrokerKey> for &'static str {
    fn from(k: BrokerKey) -> Self {
        k.0
    }
}

/// The trading capability contract implemented by broker adapter crates.
///
/// Every operation has a provided default that fails with
/// [`MaklerError::Unsupported`] naming the capability. Adapters override
/// exactly the operations their site supports; an omitted operation fails
/// immediately and explicitly, never as a silent no-op.
#[async_trait]
pub trait Broker: Send + Sync {
    /// A stable identifier for registry configuration (e.g. "yjb", "gf").
    fn name(&self) -> &'static str;

    /// Canonical broker key constructed from the static name.
    fn key(&self) -> BrokerKey {
        BrokerKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Place a buy/sell order; returns the broker-assigned order number.
    async fn place_order(&self, order: TradeOrder) -> Result<OrderId, MaklerError> {
        let _ = order;
        Err(MaklerError::unsupported(Capability::PlaceOrder))
    }

    /// Cancel an open order; returns the cancelled order number.
    async fn cancel_order(&self, order_id: &OrderId) -> Result<OrderId, MaklerError> {
        let _ = order_id;
        Err(MaklerError::unsupported(Capability::CancelOrder))
    }

    /// List today's open orders.
    async fn open_orders(&self) -> Result<Vec<OrderRecord>, MaklerError> {
        Err(MaklerError::unsupported(Capability::OpenOrders))
    }

    /// Subscribe fund units for a cash amount.
    async fn subscribe_fund(&self, symbol: &str, volume: Decimal) -> Result<OrderId, MaklerError> {
        let _ = (symbol, volume);
        Err(MaklerError::unsupported(Capability::SubscribeFund))
    }

    /// Redeem fund units.
    async fn redeem_fund(&self, symbol: &str, amount: Decimal) -> Result<OrderId, MaklerError> {
        let _ = (symbol, amount);
        Err(MaklerError::unsupported(Capability::RedeemFund))
    }

    /// Split structured-fund parent units.
    async fn split_fund(&self, symbol: &str, amount: Decimal) -> Result<OrderId, MaklerError> {
        let _ = (symbol, amount);
        Err(MaklerError::unsupported(Capability::SplitFund))
    }

    /// Merge structured-fund child units.
    async fn merge_fund(&self, symbol: &str, amount: Decimal) -> Result<OrderId, MaklerError> {
        let _ = (symbol, amount);
        Err(MaklerError::unsupported(Capability::MergeFund))
    }

    /// Query current IPO subscription limits.
    async fn ipo_limit(&self) -> Result<Vec<IpoLimit>, MaklerError> {
        Err(MaklerError::unsupported(Capability::IpoLimit))
    }

    /// Query today's IPO listings.
    async fn ipo_list(&self) -> Result<Vec<IpoListing>, MaklerError> {
        Err(MaklerError::unsupported(Capability::IpoList))
    }

    /// Transfer cash into the brokerage account.
    async fn transfer_in(&self, amount: Decimal, bank_ref: Option<&str>) -> Result<(), MaklerError> {
        let _ = (amount, bank_ref);
        Err(MaklerError::unsupported(Capability::TransferIn))
    }

    /// Transfer cash out of the brokerage account.
    async fn transfer_out(
        &self,
        amount: Decimal,
        bank_ref: Option<&str>,
    ) -> Result<(), MaklerError> {
        let _ = (amount, bank_ref);
        Err(MaklerError::unsupported(Capability::TransferOut))
    }

    /// Query current holdings, cash row included.
    async fn portfolio(&self) -> Result<Vec<Position>, MaklerError> {
        Err(MaklerError::unsupported(Capability::Portfolio))
    }

    /// Resolve the exchange-side trading account reference.
    async fn account_ref(&self) -> Result<String, MaklerError> {
        Err(MaklerError::unsupported(Capability::AccountRef))
    }
}
