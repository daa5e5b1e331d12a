//! I/O helpers for the game: configuration, page fetching, pacing, and
//! batch files.

pub mod batch_file;
pub mod config;
pub mod fetcher;
pub mod throttle;
