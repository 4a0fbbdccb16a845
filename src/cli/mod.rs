//! # CLI Module
//!
//! This module provides the command-line interface layer for Bardo. The main
//! command starts the HTTP backend; the others call the same YouTube clients
//! directly so the upstream side can be checked without a browser.
//!
//! ## Commands
//!
//! - [`serve`] - Starts the HTTP server, optionally opening the web client
//! - [`playlist`] - Fetches the fixed playlist and prints its tracks, or one
//!   random track the way the web player picks its next song
//! - [`resolve`] - Resolves one video id and prints the chosen formats
//!
//! ## Usage Patterns
//!
//! ```bash
//! bardo serve --open          # Start the backend and open the player
//! bardo playlist              # List the playlist as a table
//! bardo playlist --random     # Pick one track
//! bardo resolve dQw4w9WgXcQ   # Show the best video and audio formats
//! ```
//!
//! ## Output
//!
//! - Uses the crate's logging macros (info, warning, error, success)
//! - Shows a spinner while waiting on YouTube
//! - Prints results as `tabled` tables

mod playlist;
mod resolve;
mod serve;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use playlist::playlist;
pub use resolve::resolve;
pub use serve::serve;

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
