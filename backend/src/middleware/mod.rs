//! Actix middleware for the HTTP server.

pub mod trace;

pub use trace::Trace;
