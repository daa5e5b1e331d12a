//! First-link Wikipedia game player.
//!
//! Starting from an article, the engine repeatedly follows the first
//! qualifying in-body link until it reaches the target article, revisits an
//! article (a circle), or runs out of its step budget. The architecture keeps
//! a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (link selection, visited-set
//!   bookkeeping, batch record formatting). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (HTTP page fetching, configuration,
//!   batch files). The [`io::fetcher::PageFetcher`] trait is the seam tests mock.
//!
//! Orchestration modules ([`validator`], [`game`], [`batch`]) combine core
//! logic with a fetcher to implement the CLI commands.

pub mod batch;
pub mod core;
pub mod exit_codes;
pub mod game;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validator;
