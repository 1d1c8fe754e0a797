//! Domain primitives shared by the storage and HTTP layers.
//!
//! Nothing in this crate performs I/O.

pub mod dates;
pub mod error;
pub mod types;
pub mod webhook;
