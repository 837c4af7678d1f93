//! Integration coverage for the §5 concurrency contract: many tasks hammering
//! one [`Engine`] concurrently must serialize through its lock without ever
//! producing a crossed book or a torn trade log.

use order_book_engine::clock::MonotonicClock;
use order_book_engine::engine::Engine;
use order_book_engine::request::{Request, Side};
use std::sync::Arc;

#[tokio::test]
async fn concurrent_crossing_orders_never_observe_a_crossed_book() {
    let clock = Arc::new(MonotonicClock::new());
    let engine = Arc::new(Engine::new());

    // Seed a deep, non-crossed book.
    for i in 0..200u64 {
        let req = Request::limit(i, clock.now_micros(), Side::Sell, 1, 1_000 + i).unwrap();
        engine.submit(req).await.unwrap();
    }

    let mut tasks = tokio::task::JoinSet::new();
    for i in 200..400u64 {
        let engine = engine.clone();
        let clock = clock.clone();
        tasks.spawn(async move {
            let req = Request::limit(i, clock.now_micros(), Side::Buy, 1, 1_000 + (i % 200)).unwrap();
            let (bid, ask) = engine.spread().await;
            engine.submit(req).await.unwrap();
            (bid, ask)
        });
    }

    let observed = tasks.join_all().await;
    for (bid, ask) in observed {
        if let (Some(b), Some(a)) = (bid, ask) {
            assert!(b < a, "observed a crossed spread: bid {b} >= ask {a}");
        }
    }

    let (final_bid, final_ask) = engine.spread().await;
    if let (Some(b), Some(a)) = (final_bid, final_ask) {
        assert!(b < a, "book left crossed: bid {b} >= ask {a}");
    }
}

#[tokio::test]
async fn trades_from_one_submit_never_interleave_with_another() {
    let clock = Arc::new(MonotonicClock::new());
    let engine = Arc::new(Engine::new());

    for i in 0..100u64 {
        let req = Request::limit(i, clock.now_micros(), Side::Sell, 5, 100).unwrap();
        engine.submit(req).await.unwrap();
    }

    let mut tasks = tokio::task::JoinSet::new();
    for i in 100..120u64 {
        let engine = engine.clone();
        let clock = clock.clone();
        tasks.spawn(async move {
            let req = Request::market(i, clock.now_micros(), Side::Buy, 25).unwrap();
            engine.submit(req).await.unwrap()
        });
    }

    let results = tasks.join_all().await;
    for trades in &results {
        // Within a single submit, all trades involve exactly one incoming id -
        // proof that the match loop for one call completed atomically under
        // the lock without another submit's trades interleaving.
        let incoming_ids: std::collections::HashSet<_> =
            trades.iter().map(|t| t.incoming_id).collect();
        assert!(incoming_ids.len() <= 1);
    }

    let total_filled: u64 = results.iter().flatten().map(|t| t.size).sum();
    assert_eq!(total_filled, 500, "100 resting orders of size 5 = 500 total liquidity");
    assert_eq!(engine.size().await, 0);
}
