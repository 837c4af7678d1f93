//! The order book and matching engine: bids, asks, the trade log, and the
//! `submit_locked` match loop.

use crate::clock::MonotonicClock;
use crate::errors::EngineError;
use crate::request::{AskKey, BidKey, OrderId, Price, Request, RestingOrder, Side, Size};
use crate::trade::Trade;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use tracing::{debug, info, trace};

/// One side of the book: a priority-ordered collection of resting limit orders
/// plus an `id -> key` index so cancellation is O(log n) instead of a linear scan.
struct BookSide<K> {
    by_priority: BTreeMap<K, RestingOrder>,
    by_id: HashMap<OrderId, K>,
}

impl<K: Ord + Copy> BookSide<K> {
    fn new() -> Self {
        Self {
            by_priority: BTreeMap::new(),
            by_id: HashMap::new(),
        }
    }

    fn insert(&mut self, key: K, order: RestingOrder) {
        self.by_id.insert(order.id, key);
        self.by_priority.insert(key, order);
    }

    fn pop_best(&mut self) -> Option<RestingOrder> {
        let (&key, _) = self.by_priority.iter().next()?;
        let order = self.by_priority.remove(&key)?;
        self.by_id.remove(&order.id);
        Some(order)
    }

    fn peek_best(&self) -> Option<&RestingOrder> {
        self.by_priority.values().next()
    }

    fn remove_by_id(&mut self, id: OrderId) -> bool {
        if let Some(key) = self.by_id.remove(&id) {
            self.by_priority.remove(&key);
            true
        } else {
            false
        }
    }

    fn len(&self) -> usize {
        self.by_priority.len()
    }

    fn is_empty(&self) -> bool {
        self.by_priority.is_empty()
    }
}

/// The order book: two priority-ordered sides plus the append-only trade log.
///
/// `bids` is ordered under BUY-side `≺` (best = highest price, then earliest ts,
/// then smallest remaining size). `asks` is ordered under SELL-side `≺` (best =
/// lowest price, then earliest ts, then smallest remaining size). Both orderings
/// are enforced structurally by the key types (`BidKey`, `AskKey`), not by runtime
/// comparisons scattered through the match loop.
pub struct OrderBook {
    bids: BookSide<BidKey>,
    asks: BookSide<AskKey>,
    trades: Vec<Trade>,
    clock: MonotonicClock,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }

    /// Builds an empty book stamping trades from `clock` at emission time
    /// instead of the default `MonotonicClock`. Exists so tests (and any host
    /// that wants a single shared clock across requests and fills) can inject
    /// their own.
    pub fn with_clock(clock: MonotonicClock) -> Self {
        Self {
            bids: BookSide::new(),
            asks: BookSide::new(),
            trades: Vec::new(),
            clock,
        }
    }

    /// Price of the best (highest) resting bid, or `None` if there are no bids.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.peek_best().map(|o| o.price)
    }

    /// Price of the best (lowest) resting ask, or `None` if there are no asks.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.peek_best().map(|o| o.price)
    }

    /// `(best_bid, best_ask)` observed as a single consistent snapshot. Under the
    /// external-exclusion contract this function assumes (see `Engine` for the
    /// lock-acquiring async wrapper), this can never return a crossed pair while
    /// both sides are non-empty.
    pub fn spread(&self) -> (Option<Price>, Option<Price>) {
        (self.best_bid(), self.best_ask())
    }

    /// Total count of resting orders across both sides.
    pub fn size(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    /// The trade log, in execution order.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Human-readable listing grouped by side and price level, best first. For
    /// diagnostics only - not part of the matching contract.
    pub fn snapshot(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "bids (best first):");
        for order in self.bids.by_priority.values() {
            let _ = writeln!(out, "  {} @ {} (id={})", order.remaining, order.price, order.id);
        }
        let _ = writeln!(out, "asks (best first):");
        for order in self.asks.by_priority.values() {
            let _ = writeln!(out, "  {} @ {} (id={})", order.remaining, order.price, order.id);
        }
        out
    }

    /// Processes one request against the book. Caller provides exclusion - see
    /// `Engine::submit` for the lock-acquiring async wrapper that upholds §5 of the
    /// concurrency contract for callers that don't already hold one.
    ///
    /// Fails silently (no error, no trade) for any request that cannot produce a
    /// match and cannot rest: an unknown cancel id, or a market order against an
    /// empty opposite side.
    pub fn submit_locked(&mut self, request: Request) -> Result<Vec<Trade>, EngineError> {
        match request {
            Request::Cancel { id, .. } => {
                self.cancel(id);
                Ok(Vec::new())
            }
            Request::Market { id, ts, side, remaining, .. } => {
                let mut incoming = RestingOrder { id, ts, side, size: remaining, remaining, price: 0 };
                let trades = self.sweep(&mut incoming, |_, _| true)?;
                Ok(trades)
            }
            Request::Limit { id, ts, side, remaining, price, .. } => {
                let mut incoming = RestingOrder { id, ts, side, size: remaining, remaining, price };
                let trades = self.sweep(&mut incoming, |book, this| match this.side {
                    Side::Buy => book.best_ask().is_some_and(|ask| ask <= this.price),
                    Side::Sell => book.best_bid().is_some_and(|bid| bid >= this.price),
                })?;
                if incoming.remaining > 0 {
                    self.rest(incoming);
                }
                Ok(trades)
            }
        }
    }

    fn cancel(&mut self, id: OrderId) {
        if self.bids.remove_by_id(id) {
            debug!(order_id = id, side = "buy", "cancelled");
            return;
        }
        if self.asks.remove_by_id(id) {
            debug!(order_id = id, side = "sell", "cancelled");
            return;
        }
        trace!(order_id = id, "cancel no-op: unknown id");
    }

    fn rest(&mut self, order: RestingOrder) {
        match order.side {
            Side::Buy => {
                let key = BidKey::of(&order);
                self.bids.insert(key, order);
            }
            Side::Sell => {
                let key = AskKey::of(&order);
                self.asks.insert(key, order);
            }
        }
        debug!(order_id = order.id, remaining = order.remaining, price = order.price, "resting");
    }

    /// Shared pop/fill/trade/reinsert loop used by both the market and limit
    /// paths. `matchable` decides, against the *current* best of the opposite
    /// side, whether the sweep should keep going; for a market order it is always
    /// `true`, for a limit order it is the crossing predicate from §4.3. Each
    /// trade is stamped with `self.clock.now_micros()` at the point it is
    /// emitted, per §4.3's `ts = now_micros()` - not the aggressor's
    /// construction-time `ts`, so a multi-level sweep produces a distinct,
    /// increasing `ts` per fill rather than one shared timestamp.
    fn sweep(
        &mut self,
        incoming: &mut RestingOrder,
        matchable: impl Fn(&OrderBook, &RestingOrder) -> bool,
    ) -> Result<Vec<Trade>, EngineError> {
        let mut trades = Vec::new();
        loop {
            if incoming.remaining == 0 || !matchable(self, incoming) {
                break;
            }
            let opp_empty = match incoming.side {
                Side::Buy => self.asks.is_empty(),
                Side::Sell => self.bids.is_empty(),
            };
            if opp_empty {
                break;
            }
            let mut book = match incoming.side {
                Side::Buy => self.asks.pop_best(),
                Side::Sell => self.bids.pop_best(),
            }
            .expect("opposite side checked non-empty above");

            if book.remaining == 0 {
                return Err(EngineError::InvariantViolation(
                    "resting order with zero remaining quantity was present in the book",
                ));
            }

            let fill = book.remaining.min(incoming.remaining);
            let trade = Trade {
                ts: self.clock.now_micros(),
                side: incoming.side,
                price: book.price,
                size: fill,
                incoming_id: incoming.id,
                book_id: book.id,
            };
            info!(
                incoming_id = trade.incoming_id,
                book_id = trade.book_id,
                price = trade.price,
                size = trade.size,
                "trade"
            );
            trades.push(trade);

            incoming.remaining -= fill;
            book.remaining -= fill;

            if book.remaining > 0 {
                self.rest(book);
            }
        }
        self.trades.extend(trades.iter().copied());
        Ok(trades)
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
