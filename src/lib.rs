//! Keeps hex-encoded WebAssembly literals in C++ and Rust test sources in sync
//! with the `/* wat2wasm ... */` blocks they were compiled from.

pub mod compile;
pub mod config;
pub mod cursor;
pub mod dialect;
pub mod error;
pub mod finalize;
pub mod literal;
pub mod paths;
pub mod pipeline;
pub mod remap;
pub mod scanner;
pub mod splice;
