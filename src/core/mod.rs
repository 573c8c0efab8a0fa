//! Core functionality for the gateway
//!
//! Pure calculation logic with no I/O. The server and services layers are
//! consumers of this module, never the other way around.

pub mod pricing;
