//! Integration tests for the ignis client.
//!
//! Every test runs against a local `wiremock` server standing in for the
//! Flair API, so no credentials or network access are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With client logs
//! RUST_LOG=ignis=debug cargo test --test integration -- --nocapture
//! ```

mod auth_tests;
mod client_tests;
mod common;
mod resource_tests;
