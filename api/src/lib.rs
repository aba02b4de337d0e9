//! Types, traits and the error surface of the in-memory filesystem core
//!
//! This crate contains everything a consumer of the core needs to talk to it:
//! the plain data types ([`types`]), the capability traits an implementation
//! provides ([`fs`]), and the uniform error surface shared by all operations
//! ([`error`]).
//!
//! The implementation itself lives in the `ramfs` crate of this workspace.
//! Keeping the interface in its own crate means the shared tests under
//! `fs-tests/` are written against the traits alone, and a different
//! implementation could be swapped in without touching them.
//!
//! [`types`]: types/index.html
//! [`fs`]: fs/index.html
//! [`error`]: error/index.html

#![deny(missing_docs)]

//The uniform error surface
pub mod error;

//Basic modules for types
pub mod types;

//Traits an implementation provides
pub mod fs;
