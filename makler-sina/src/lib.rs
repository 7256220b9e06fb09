//! Batched, parallel quote retrieval over the Sina-style HTTP feed.
//!
//! The feed answers `GET {base}/?rn=<ts>&list=<codes>` with one
//! `var name="f1,f2,...";` line per requested code. [`SinaQuotes`] splits
//! long symbol lists into bounded chunks, requests them concurrently with a
//! fixed width, and reassembles one [`makler_core::QuoteRow`] per symbol in
//! the caller's order. Parsing never fails a fetch: malformed lines become
//! all-missing sentinel rows.
//!
//! Quote retrieval is unauthenticated and independent of any
//! `makler_session` session; it only shares the standard outbound headers.

#![warn(missing_docs)]

mod fetch;
pub mod parse;

pub use fetch::{
    DEFAULT_BASE_URL, FETCH_CONCURRENCY, HttpQuoteTransport, MAX_BATCH, QuoteTransport,
    SinaQuotes,
};
