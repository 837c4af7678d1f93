//! Inbound request shapes, the side tag, and the priority relation over resting
//! limit orders.

use std::cmp::Reverse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type OrderId = u64;
pub type Ts = u64;
pub type Price = u64;
pub type Size = u64;

/// Which side of the book a request (or a resting order) belongs to.
///
/// Conventional wire mapping, if a host ever serializes this, is BUY=0, SELL=1 -
/// not mandated by this crate, which has no wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("order size must be > 0")]
    ZeroSize,
}

/// A request submitted to the matching engine.
///
/// `Cancel` deliberately carries none of `side`/`size`/`price`/`remaining` - reading
/// those on a cancel is a compile error, not a runtime one, since there is no such
/// field to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Cancel {
        id: OrderId,
        ts: Ts,
    },
    Market {
        id: OrderId,
        ts: Ts,
        side: Side,
        size: Size,
        remaining: Size,
    },
    Limit {
        id: OrderId,
        ts: Ts,
        side: Side,
        size: Size,
        remaining: Size,
        price: Price,
    },
}

impl Request {
    /// Builds a `Cancel` request. Carries no side/size/price.
    pub fn cancel(id: OrderId, ts: Ts) -> Self {
        Request::Cancel { id, ts }
    }

    /// Builds a `Market` request. `size` must be positive.
    pub fn market(id: OrderId, ts: Ts, side: Side, size: Size) -> Result<Self, RequestError> {
        if size == 0 {
            return Err(RequestError::ZeroSize);
        }
        Ok(Request::Market {
            id,
            ts,
            side,
            size,
            remaining: size,
        })
    }

    /// Builds a `Limit` request. `size` must be positive.
    pub fn limit(
        id: OrderId,
        ts: Ts,
        side: Side,
        size: Size,
        price: Price,
    ) -> Result<Self, RequestError> {
        if size == 0 {
            return Err(RequestError::ZeroSize);
        }
        Ok(Request::Limit {
            id,
            ts,
            side,
            size,
            remaining: size,
            price,
        })
    }

    pub fn id(&self) -> OrderId {
        match self {
            Request::Cancel { id, .. } => *id,
            Request::Market { id, .. } => *id,
            Request::Limit { id, .. } => *id,
        }
    }

    pub fn ts(&self) -> Ts {
        match self {
            Request::Cancel { ts, .. } => *ts,
            Request::Market { ts, .. } => *ts,
            Request::Limit { ts, .. } => *ts,
        }
    }
}

/// A limit order resting in one side of the book.
///
/// Produced from a `Request::Limit` (either on first rest, or as the unfilled
/// remainder of an incoming limit order after it has swept the opposite side).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestingOrder {
    pub id: OrderId,
    pub ts: Ts,
    pub side: Side,
    pub size: Size,
    pub remaining: Size,
    pub price: Price,
}

/// The BUY-side priority key: ascending order over this key is exactly `≺` on the
/// BUY side (higher price is better, then earlier ts, then smaller remaining size,
/// then id as a final deterministic tie-break).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BidKey {
    price: Reverse<Price>,
    ts: Ts,
    remaining: Size,
    id: OrderId,
}

impl BidKey {
    pub fn of(order: &RestingOrder) -> Self {
        BidKey {
            price: Reverse(order.price),
            ts: order.ts,
            remaining: order.remaining,
            id: order.id,
        }
    }
}

/// The SELL-side priority key: ascending order over this key is exactly `≺` on the
/// SELL side (lower price is better, then earlier ts, then smaller remaining size,
/// then id as a final deterministic tie-break).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AskKey {
    price: Price,
    ts: Ts,
    remaining: Size,
    id: OrderId,
}

impl AskKey {
    pub fn of(order: &RestingOrder) -> Self {
        AskKey {
            price: order.price,
            ts: order.ts,
            remaining: order.remaining,
            id: order.id,
        }
    }
}
