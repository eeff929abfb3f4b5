// Wed Jan 15 2026 - Alex

pub mod args;

pub use args::Args;

use clap::Parser;

pub fn parse_args() -> Args {
    Args::parse()
}
