//! Shared functionality
//!
//! This crate supplies the character stream, source locations and the error types that are
//! used by the verbatim CSS crates.
//!

pub mod byte_stream;
pub mod errors;
