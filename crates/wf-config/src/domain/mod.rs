//! Domain layer: configuration records and their in-memory operations.
//!
//! Nothing in here reads files or parses text.  The storage layer is the only
//! place that knows about `config.ini`.

pub mod config;
