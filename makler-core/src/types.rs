//! Common data structures shared across the makler ecosystem.

use chrono::NaiveDate;
use core::fmt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier a broker assigns to an accepted order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap a broker-assigned order number.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw order number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Side of a trade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    /// Buy the instrument.
    Buy,
    /// Sell the instrument.
    Sell,
}

impl OrderSide {
    /// Stable lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state a broker reports for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum OrderStatus {
    /// Accepted, nothing filled yet.
    Pending,
    /// Partially filled.
    PartiallyFilled,
    /// Fully filled.
    Filled,
    /// Cancelled before completion.
    Cancelled,
    /// Rejected by the broker or exchange.
    Rejected,
    /// Reported state did not map to a known status.
    Unknown,
}

/// An order placement request, as handed to [`crate::Broker::place_order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOrder {
    /// Instrument code, e.g. `sz150023`.
    pub symbol: String,
    /// Buy or sell.
    pub side: OrderSide,
    /// Requested limit price.
    pub price: Decimal,
    /// Requested amount (shares/units).
    pub amount: Decimal,
}

/// One row of a broker's open-order listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Broker-assigned order number.
    pub order_id: OrderId,
    /// Instrument code.
    pub symbol: String,
    /// Instrument display name, when the broker reports one.
    pub name: Option<String>,
    /// Buy or sell.
    pub side: OrderSide,
    /// Requested limit price.
    pub order_price: Decimal,
    /// Requested amount.
    pub order_amount: Decimal,
    /// Average filled price so far.
    pub filled_price: Decimal,
    /// Filled amount so far.
    pub filled_amount: Decimal,
    /// Current lifecycle state.
    pub status: OrderStatus,
    /// Broker-reported order timestamp, verbatim.
    pub order_time: Option<String>,
}

/// One holding row of a portfolio query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Instrument code, or `cash` for the cash row.
    pub symbol: String,
    /// Instrument display name.
    pub name: Option<String>,
    /// Total amount currently held.
    pub current_amount: Decimal,
    /// Amount available to sell today.
    pub sellable_amount: Decimal,
    /// Last trade price used for valuation.
    pub last_trade: Decimal,
    /// Market value of the holding.
    pub market_value: Decimal,
    /// Share of the portfolio's total value, in `[0, 1]`.
    pub weight: Decimal,
}

/// IPO subscription limit for one exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpoLimit {
    /// Exchange identifier.
    pub exchange: String,
    /// Maximum subscribable amount.
    pub max_buy_amount: Decimal,
    /// Subscription lot size.
    pub buy_unit: Decimal,
}

/// One row of today's IPO listing query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpoListing {
    /// Instrument code.
    pub symbol: String,
    /// Instrument display name.
    pub name: String,
    /// Exchange identifier.
    pub exchange: String,
    /// Maximum subscribable amount.
    pub max_buy_amount: Decimal,
    /// Subscription lot size.
    pub buy_unit: Decimal,
    /// Settlement currency.
    pub currency: String,
    /// Offering price.
    pub price: Decimal,
    /// Offering date.
    pub date: Option<NaiveDate>,
    /// Broker-reported offering status, verbatim.
    pub status: Option<String>,
}

/// One depth level of a quote: resting volume at a price.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteLevel {
    /// Resting volume at this level.
    pub volume: Option<f64>,
    /// Price of this level.
    pub price: Option<f64>,
}

/// One row of a batched quote fetch.
///
/// Every field is optional: a source line that fails to parse is replaced
/// wholesale by [`QuoteRow::missing`], so a missing instrument and a
/// malformed line are indistinguishable to the caller. That loss of
/// fidelity is deliberate; partial market data beats an aborted fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteRow {
    /// Instrument display name.
    pub name: Option<String>,
    /// Opening price.
    pub open: Option<f64>,
    /// Previous session's closing price.
    pub prev_close: Option<f64>,
    /// Last trade price.
    pub last_trade: Option<f64>,
    /// Session high.
    pub high: Option<f64>,
    /// Session low.
    pub low: Option<f64>,
    /// Top-of-book bid price.
    pub bid: Option<f64>,
    /// Top-of-book ask price.
    pub ask: Option<f64>,
    /// Cumulative traded volume.
    pub volume: Option<f64>,
    /// Cumulative traded amount.
    pub amount: Option<f64>,
    /// Five bid levels, best first.
    pub bids: [QuoteLevel; 5],
    /// Five ask levels, best first.
    pub asks: [QuoteLevel; 5],
    /// Trade date, verbatim from the feed.
    pub date: Option<String>,
    /// Trade time, verbatim from the feed.
    pub time: Option<String>,
    /// Feed status flag, verbatim.
    pub status: Option<String>,
}

impl QuoteRow {
    /// The all-missing sentinel substituted for unparseable lines.
    #[must_use]
    pub fn missing() -> Self {
        Self::default()
    }

    /// Whether this row is the all-missing sentinel.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        *self == Self::default()
    }
}

/// Quote rows indexed by the caller's requested symbols, in requested order.
///
/// Duplicates in the request produce duplicate rows here; completion order
/// of the underlying batch requests never leaks into row order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteTable {
    symbols: Vec<String>,
    rows: Vec<QuoteRow>,
}

impl QuoteTable {
    /// Build a table from parallel symbol and row vectors.
    ///
    /// # Panics
    /// Panics if the two vectors differ in length; callers assemble both
    /// from the same request list.
    #[must_use]
    pub fn new(symbols: Vec<String>, rows: Vec<QuoteRow>) -> Self {
        assert_eq!(symbols.len(), rows.len(), "one row per requested symbol");
        Self { symbols, rows }
    }

    /// Number of rows (equals the number of requested symbols).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row for `symbol`, if it was requested.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&QuoteRow> {
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .map(|i| &self.rows[i])
    }

    /// Iterate `(symbol, row)` pairs in requested order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QuoteRow)> {
        self.symbols
            .iter()
            .map(String::as_str)
            .zip(self.rows.iter())
    }

    /// The requested symbols, in order.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// The rows, in requested-symbol order.
    #[must_use]
    pub fn rows(&self) -> &[QuoteRow] {
        &self.rows
    }
}
