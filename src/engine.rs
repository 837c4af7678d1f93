//! The lock-acquiring async surface over a single [`OrderBook`].
//!
//! Scheduling model is cooperative single-writer per book (§5): at most one
//! `submit` or composite read (`spread`) executes at a time. The lock is acquired
//! at the entry of each async method and released on every exit path via the
//! `tokio::sync::MutexGuard`'s `Drop`. There are no suspension points inside the
//! critical section other than awaiting the lock itself - `OrderBook::submit_locked`
//! is fully synchronous, so the match loop runs to completion before the guard is
//! dropped.

use crate::errors::EngineError;
use crate::orderbook::OrderBook;
use crate::request::{Price, Request};
use crate::trade::Trade;
use tokio::sync::Mutex;

/// A single orderbook guarded by a per-book mutex, for use by callers that do not
/// already hold their own external exclusion. Distinct `Engine`s share no state and
/// may run on independent tasks (§5) - there is no cross-book coordination here.
pub struct Engine {
    book: Mutex<OrderBook>,
}

impl Engine {
    pub fn new() -> Self {
        Self { book: Mutex::new(OrderBook::new()) }
    }

    /// Acquires the lock, routes `request` through `OrderBook::submit_locked`, and
    /// releases the lock. All trades produced by this call are appended to the
    /// trade log before the lock is released, so two `submit` calls serialized
    /// through this method never interleave their trades.
    pub async fn submit(&self, request: Request) -> Result<Vec<Trade>, EngineError> {
        let mut book = self.book.lock().await;
        book.submit_locked(request)
    }

    pub async fn get_bid(&self) -> Option<Price> {
        let book = self.book.lock().await;
        book.best_bid()
    }

    pub async fn get_ask(&self) -> Option<Price> {
        let book = self.book.lock().await;
        book.best_ask()
    }

    /// `(best_bid, best_ask)` from a single lock acquisition - the two prices are
    /// drawn from one consistent state, never torn by a concurrent `submit`.
    pub async fn spread(&self) -> (Option<Price>, Option<Price>) {
        let book = self.book.lock().await;
        book.spread()
    }

    pub async fn size(&self) -> usize {
        let book = self.book.lock().await;
        book.size()
    }

    pub async fn snapshot(&self) -> String {
        let book = self.book.lock().await;
        book.snapshot()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
