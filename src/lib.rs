//! A single-instrument limit order book and matching engine.
//!
//! [`orderbook::OrderBook`] owns the bids/asks/trade-log triple and the
//! synchronous `submit_locked` match loop; [`engine::Engine`] wraps it in a
//! `tokio::sync::Mutex` for callers that need the cooperative single-writer
//! contract instead of supplying their own external exclusion.

pub mod clock;
pub mod engine;
pub mod errors;
pub mod orderbook;
pub mod request;
pub mod trade;
