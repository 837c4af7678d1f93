use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting global tracing subscriber");

    let cli = cli::Cli::parse();
    cli::run(cli);
}
