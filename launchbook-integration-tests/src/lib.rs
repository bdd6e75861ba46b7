//! Integration tests for `launchbook`
//!
//! This crate contains integration tests that verify the interaction between
//! the domain core and the in-memory adapters: end-to-end booking flows,
//! cancellation flows, and the capacity invariant under concurrency.

// This is a test-only crate
#![cfg(test)]
