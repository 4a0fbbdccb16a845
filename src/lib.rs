//! Bardo web player backend library
//!
//! This library provides the HTTP glue between the Bardo web client and
//! YouTube: a playlist lookup against YouTube Music and stream resolution for
//! a single video. It includes modules for the HTTP API, the CLI commands,
//! configuration management and the YouTube clients themselves.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the playlist and play endpoints
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `server` - Router construction, CORS policy and static file serving
//! - `utils` - Parsing helpers for YouTube responses
//! - `youtube` - YouTube Music catalog and stream resolver clients
//!
//! # Example
//!
//! ```
//! use bardo::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> bardo::Res<()> {
//!     config::load_env().await?;
//!     server::start_api_server(server::AppState::from_env()).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod server;
pub mod utils;
pub mod youtube;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use bardo::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Starting server on {}", addr);
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Playlist fetched successfully");
/// success!("Resolved {} formats", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Failed to bind server address");
/// error!("Cannot load environment. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program termination.
/// Used for recoverable issues or important information that users should notice.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Playlist lookup failed: {}", e);
/// warning!("Skipping {} ciphered formats", skipped);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
