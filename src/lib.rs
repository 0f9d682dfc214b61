//! Proda - minimal request dispatch server.
//!
//! Core library: typed containers, request-line parsing, and path routing.

pub mod config;
pub mod container;
pub mod http;
pub mod router;
pub mod server;
