//! Encoders for output formats that live outside the library.

pub mod cbor;
pub mod toml;
pub mod yaml;
