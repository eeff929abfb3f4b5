// Wed Jan 15 2026 - Alex

pub mod banner;
pub mod cli;
pub mod progress;

pub use banner::Banner;
pub use cli::Args;
pub use progress::ProgressManager;

use colored::Colorize;

pub fn status(message: &str) {
    println!("{} {}", "[*]".blue(), message);
}

pub fn success(message: &str) {
    println!("{} {}", "[+]".green(), message);
}

pub fn failure(message: &str) {
    eprintln!("{} {}", "[!]".red(), message);
}
