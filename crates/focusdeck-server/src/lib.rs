//! REST backend for Focusdeck.
//!
//! Maps the endpoints under `/api` directly onto the two record stores in
//! focusdeck-core. The binary in `main.rs` wires configuration, logging,
//! and the listener around [`routes::router`].

pub mod error;
pub mod routes;
pub mod state;
