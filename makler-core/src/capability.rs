use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for errors and telemetry.
///
/// These map one-to-one with `Broker` operations and allow consistent
/// Display formatting and match-exhaustive handling when adding new
/// capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Place a buy/sell order.
    PlaceOrder,
    /// Cancel an open order by id.
    CancelOrder,
    /// List today's open orders.
    OpenOrders,

    /// Subscribe (purchase) open-end fund units.
    SubscribeFund,
    /// Redeem fund units.
    RedeemFund,
    /// Split structured fund units.
    SplitFund,
    /// Merge structured fund units.
    MergeFund,

    /// Query IPO subscription limits.
    IpoLimit,
    /// Query today's IPO listings.
    IpoList,

    /// Transfer cash into the brokerage account.
    TransferIn,
    /// Transfer cash out of the brokerage account.
    TransferOut,

    /// Query current holdings.
    Portfolio,
    /// Resolve the exchange-side trading account reference.
    AccountRef,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlaceOrder => "place-order",
            Self::CancelOrder => "cancel-order",
            Self::OpenOrders => "open-orders",
            Self::SubscribeFund => "subscribe-fund",
            Self::RedeemFund => "redeem-fund",
            Self::SplitFund => "split-fund",
            Self::MergeFund => "merge-fund",
            Self::IpoLimit => "ipo-limit",
            Self::IpoList => "ipo-list",
            Self::TransferIn => "transfer-in",
            Self::TransferOut => "transfer-out",
            Self::Portfolio => "portfolio",
            Self::AccountRef => "account-ref",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
