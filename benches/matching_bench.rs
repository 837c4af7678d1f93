use criterion::{Criterion, criterion_group, criterion_main};
use order_book_engine::clock::MonotonicClock;
use order_book_engine::orderbook::OrderBook;
use order_book_engine::request::{Request, Side};

/// Seeds `orders_per_level` resting limit orders at each of `depth` price
/// levels, all on `side`. Seeding only one side means nothing crosses on
/// insertion, so the returned book actually rests to the intended depth
/// instead of immediately annihilating against an opposite-side order at
/// the same price.
fn setup_one_sided_book(clock: &MonotonicClock, depth: u64, orders_per_level: u64, side: Side) -> OrderBook {
    let mut ob = OrderBook::new();
    let mut id = 0u64;
    for level in 1..=depth {
        for _ in 0..orders_per_level {
            id += 1;
            let order = Request::limit(id, clock.now_micros(), side, 1, level).unwrap();
            ob.submit_locked(order).unwrap();
        }
    }
    ob
}

fn bench_match_order(c: &mut Criterion) {
    let depth = 100;
    let orders_per_level = 10;
    let clock = MonotonicClock::new();

    c.bench_function("sweep 1 market order through book depth", |b| {
        b.iter_batched(
            || setup_one_sided_book(&clock, depth, orders_per_level, Side::Sell),
            |mut ob| {
                let market_buy = Request::market(
                    u64::MAX,
                    clock.now_micros(),
                    Side::Buy,
                    depth * orders_per_level / 2,
                )
                .unwrap();
                ob.submit_locked(market_buy).unwrap();
            },
            criterion::BatchSize::SmallInput,
        )
    });

    c.bench_function("sweep 1 crossing limit order through book depth", |b| {
        b.iter_batched(
            // Resting bids only, so the incoming sell has something to cross
            // without anything annihilating during setup.
            || setup_one_sided_book(&clock, depth, orders_per_level, Side::Buy),
            |mut ob| {
                let crossing_sell = Request::limit(
                    u64::MAX,
                    clock.now_micros(),
                    Side::Sell,
                    depth * orders_per_level,
                    depth / 2,
                )
                .unwrap();
                ob.submit_locked(crossing_sell).unwrap();
            },
            criterion::BatchSize::SmallInput,
        )
    });

    c.bench_function("cancel from a populated book", |b| {
        b.iter_batched(
            // id 1 is the first ask seeded; since only asks are seeded here,
            // nothing crosses during setup and it is still resting.
            || (setup_one_sided_book(&clock, depth, orders_per_level, Side::Sell), 1u64),
            |(mut ob, id)| {
                ob.submit_locked(Request::cancel(id, clock.now_micros())).unwrap();
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_match_order);
criterion_main!(benches);
