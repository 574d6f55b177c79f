//! Core types and operations for the lead intake and review service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! transport (`intake-api`) and persistence backends (`intake-store-sqlite`)
//! depend on it; it depends on nothing of theirs.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod demo;
pub mod error;
pub mod intake;
pub mod lead;
pub mod lifecycle;
pub mod memory;
pub mod query;
pub mod store;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use memory::MemoryStore;
