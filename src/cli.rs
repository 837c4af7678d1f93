//! Host harness for the matching engine: a `clap`-derived CLI that builds
//! [`Request`]s and drives a single in-process [`OrderBook`] via
//! `submit_locked`. This is the "external caller" the core's data model
//! assumes exists - it is deliberately outside the core's tested contract.

use clap::{Parser, Subcommand, builder::PossibleValuesParser};

use order_book_engine::clock::MonotonicClock;
use order_book_engine::orderbook::OrderBook;
use order_book_engine::request::{Request, Side};

#[derive(Parser)]
#[command(name = "order-book-cli")]
#[command(version, about = "A demo of a limit order book matching engine")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a limit order to the book; any unfilled remainder rests.
    Add {
        /// Caller-supplied unique order id
        id: u64,
        #[arg(value_parser = PossibleValuesParser::new(["buy", "sell"]))]
        side: String,
        /// Limit price, in integer ticks
        price: u64,
        /// Quantity (must be > 0)
        size: u64,
    },
    /// Submit a market order; any unfilled remainder is discarded.
    Match {
        id: u64,
        #[arg(value_parser = PossibleValuesParser::new(["buy", "sell"]))]
        side: String,
        size: u64,
    },
    /// Cancel a resting order by id. A no-op if the id is not resting.
    Cancel { id: u64 },
    /// Print the current book, best first per side.
    Book,
}

fn parse_side(raw: &str) -> Side {
    match raw {
        "buy" => Side::Buy,
        "sell" => Side::Sell,
        _ => unreachable!("clap restricts this value to buy/sell"),
    }
}

/// Runs one CLI invocation against a fresh, in-process [`OrderBook`].
///
/// A real host would keep the book alive across many calls (that's what
/// [`order_book_engine::engine::Engine`] is for); this binary is a one-shot
/// demo, so each invocation starts from an empty book.
pub fn run(cli: Cli) {
    let clock = MonotonicClock::new();
    let mut book = OrderBook::new();

    match cli.command {
        Commands::Add { id, side, price, size } => {
            let side = parse_side(&side);
            match Request::limit(id, clock.now_micros(), side, size, price) {
                Ok(req) => submit_and_report(&mut book, req),
                Err(err) => eprintln!("rejected: {err}"),
            }
        }
        Commands::Match { id, side, size } => {
            let side = parse_side(&side);
            match Request::market(id, clock.now_micros(), side, size) {
                Ok(req) => submit_and_report(&mut book, req),
                Err(err) => eprintln!("rejected: {err}"),
            }
        }
        Commands::Cancel { id } => {
            let req = Request::cancel(id, clock.now_micros());
            submit_and_report(&mut book, req);
        }
        Commands::Book => print!("{}", book.snapshot()),
    }
}

fn submit_and_report(book: &mut OrderBook, request: Request) {
    match book.submit_locked(request) {
        Ok(trades) if trades.is_empty() => println!("no trades"),
        Ok(trades) => {
            for trade in &trades {
                println!(
                    "trade: {} @ {} (incoming={}, resting={})",
                    trade.size, trade.price, trade.incoming_id, trade.book_id
                );
            }
        }
        Err(err) => {
            tracing::error!(%err, "invariant violation");
            std::process::exit(1);
        }
    }
}
