//! # Activity Logger
//!
//! Desktop prompt scheduler. Periodically raises a small input window asking
//! the user what they are working on, within a configurable weekly schedule,
//! and manages the application's windows, tray icon and login session.
//!
//! The crate never draws anything itself: it drives a view/shell process over
//! a line-delimited JSON protocol on stdin/stdout.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use activity_logger::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
