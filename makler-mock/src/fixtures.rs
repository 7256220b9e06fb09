//! Deterministic fixture data the mock broker serves.

use makler_core::{IpoLimit, IpoListing, Position};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().expect("fixture decimal")
}

pub fn positions() -> Vec<Position> {
    vec![
        Position {
            symbol: "cash".to_string(),
            name: Some("现金".to_string()),
            current_amount: dec("25000.00"),
            sellable_amount: dec("25000.00"),
            last_trade: dec("1.00"),
            market_value: dec("25000.00"),
            weight: dec("0.25"),
        },
        Position {
            symbol: "sh600000".to_string(),
            name: Some("浦发银行".to_string()),
            current_amount: dec("5000"),
            sellable_amount: dec("5000"),
            last_trade: dec("10.05"),
            market_value: dec("50250.00"),
            weight: dec("0.5025"),
        },
        Position {
            symbol: "sz150023".to_string(),
            name: Some("深成指B".to_string()),
            current_amount: dec("30000"),
            sellable_amount: dec("20000"),
            last_trade: dec("0.825"),
            market_value: dec("24750.00"),
            weight: dec("0.2475"),
        },
    ]
}

pub fn ipo_limits() -> Vec<IpoLimit> {
    vec![
        IpoLimit {
            exchange: "SH".to_string(),
            max_buy_amount: dec("18000"),
            buy_unit: dec("1000"),
        },
        IpoLimit {
            exchange: "SZ".to_string(),
            max_buy_amount: dec("9500"),
            buy_unit: dec("500"),
        },
    ]
}

pub fn ipo_listings() -> Vec<IpoListing> {
    vec![IpoListing {
        symbol: "sh732001".to_string(),
        name: "测试新股".to_string(),
        exchange: "SH".to_string(),
        max_buy_amount: dec("18000"),
        buy_unit: dec("1000"),
        currency: "CNY".to_string(),
        price: dec("6.80"),
        date: chrono::NaiveDate::from_ymd_opt(2016, 3, 18),
        status: Some("申购".to_string()),
    }]
}

pub const ACCOUNT_REF: &str = "A123456789";
