//! Deterministic, pure logic shared by the game engine.
//!
//! Core modules must be free of I/O side effects. They operate on parsed
//! documents and in-memory data and return deterministic outputs suitable for
//! tests.

pub mod batch_format;
pub mod extractor;
pub mod styles;
pub mod title;
pub mod types;
pub mod visited;
