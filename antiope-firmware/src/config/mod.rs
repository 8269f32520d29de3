//! Page registry configuration
//!
//! The registry is embedded as TOML at compile time (validated by the
//! build script) and parsed on-device by a minimal TOML subset parser.

pub mod toml;

pub use toml::{parse_registry, ParseError};
