//! The immutable trade record emitted by a match.

use crate::request::{OrderId, Price, Side, Size, Ts};
use serde::{Deserialize, Serialize};

/// One fill between an aggressor (incoming) order and a passive (resting) order.
///
/// - `price` is always the resting order's price - the incoming order's limit, when
///   present, bounds participation but never sets the print price.
/// - `side` is the aggressor's side.
///
/// Immutable once constructed; ordering in the trade log is purely by position, not
/// by any field on `Trade` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub ts: Ts,
    pub side: Side,
    pub price: Price,
    pub size: Size,
    pub incoming_id: OrderId,
    pub book_id: OrderId,
}
