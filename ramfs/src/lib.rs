//! In-memory POSIX-like filesystem core
//!
//! All metadata and file contents live in process memory; nothing is
//! persisted. The hard part — and the reason this crate exists — is the
//! inode graph: a tree of directory and file inodes connected by named
//! entries, with hard links, rename with overwrite, unlink-while-open
//! semantics, and a whole-tree teardown that terminates despite the `.` and
//! `..` self-edges making the graph cyclic.
//!
//! The crate implements the trait ladder of
//! [`ramfs_api::fs`](../ramfs_api/fs/index.html) on a single type,
//! [`RamFs`](inode_support/struct.RamFs.html). The modules follow the
//! ladder bottom-up:
//!
//! 1. [`inode_support`](inode_support/index.html): the inode table and the
//!    filesystem lifecycle, including teardown.
//! 2. [`rw_support`](rw_support/index.html): file contents and open counts.
//! 3. [`dir_support`](dir_support/index.html): entry-list primitives.
//! 4. [`path_support`](path_support/index.html): the path resolver and the
//!    namespace mutators.
//!
//! Access is assumed serialized; see the notes on concurrency in the api
//! crate's `fs` module.

// Declare the modules of which this project consists:

pub mod inode_support;

pub mod rw_support;

pub mod dir_support;

pub mod path_support;
