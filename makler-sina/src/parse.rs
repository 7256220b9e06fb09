//! Resilient parsing of the feed's `var name="f1,f2,...";` lines.

use makler_core::{QuoteLevel, QuoteRow};

/// Positional fields per quote line: name, open, previous close, last trade,
/// high, low, top-of-book bid and ask, cumulative volume and amount, five
/// (volume, price) bid levels, five (volume, price) ask levels, trade date,
/// trade time, status flag.
pub const FIELD_COUNT: usize = 33;

/// Parse one feed line into a [`QuoteRow`].
///
/// A line with no quoted payload, or whose payload does not split into
/// exactly [`FIELD_COUNT`] fields, yields the all-missing sentinel instead
/// of an error. Individual fields that fail to parse as numbers are dropped
/// to `None` without affecting their neighbors.
///
/// A row with a cumulative volume of exactly zero has not traded this
/// session, so its last-trade field is replaced with the previous close.
#[must_use]
pub fn parse_line(line: &str) -> QuoteRow {
    let Some(payload) = line.split('"').nth(1) else {
        return QuoteRow::missing();
    };
    let fields: Vec<&str> = payload.split(',').collect();
    if fields.len() != FIELD_COUNT {
        return QuoteRow::missing();
    }

    let num = |i: usize| fields[i].trim().parse::<f64>().ok();
    let text = |i: usize| {
        let s = fields[i].trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    let mut row = QuoteRow {
        name: text(0),
        open: num(1),
        prev_close: num(2),
        last_trade: num(3),
        high: num(4),
        low: num(5),
        bid: num(6),
        ask: num(7),
        volume: num(8),
        amount: num(9),
        bids: Default::default(),
        asks: Default::default(),
        date: text(30),
        time: text(31),
        status: text(32),
    };
    for level in 0..5 {
        row.bids[level] = QuoteLevel {
            volume: num(10 + 2 * level),
            price: num(11 + 2 * level),
        };
        row.asks[level] = QuoteLevel {
            volume: num(20 + 2 * level),
            price: num(21 + 2 * level),
        };
    }

    if row.volume == Some(0.0) {
        row.last_trade = row.prev_close;
    }
    row
}

/// Parse a whole response body: one row per non-blank line.
#[must_use]
pub fn parse_body(body: &str) -> Vec<QuoteRow> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}
