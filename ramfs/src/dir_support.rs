//! Entry-list primitives.
//!
//! A directory's contents is its entry list, kept in insertion order; that
//! order is what directory enumeration shows to the outside. The mutators
//! here are deliberately dumb list operations — no uniqueness checks, no
//! link-count changes — because the namespace bookkeeping belongs to the
//! path layer, which always adjusts both sides of an edge together.

use ramfs_api::error::FsError;
use ramfs_api::fs::DirectorySupport;
use ramfs_api::types::{DirEntry, NodeData, DOT, DOTDOT};

use crate::inode_support::RamFs;

/// Name of the file system type in this crate, for the shared tests.
pub use crate::inode_support::FSName;

impl RamFs {
    /// Borrow the entry list of directory `dir`.
    fn entries(&self, dir: u64) -> Result<&Vec<DirEntry>, FsError> {
        match &self.node(dir)?.data {
            NodeData::Entries(list) => Ok(list),
            _ => Err(FsError::NotDir("inode has no entry list")),
        }
    }

    /// Mutable counterpart of `entries`.
    fn entries_mut(&mut self, dir: u64) -> Result<&mut Vec<DirEntry>, FsError> {
        match &mut self.node_mut(dir)?.data {
            NodeData::Entries(list) => Ok(list),
            _ => Err(FsError::NotDir("inode has no entry list")),
        }
    }

    /// A directory is empty when `.` and `..` are its only members.
    pub(crate) fn dir_is_empty(&self, dir: u64) -> Result<bool, FsError> {
        Ok(self
            .entries(dir)?
            .iter()
            .all(|e| e.name.as_slice() == DOT || e.name.as_slice() == DOTDOT))
    }
}

impl DirectorySupport for RamFs {
    fn dirlookup(&self, dir: u64, name: &[u8]) -> Result<u64, FsError> {
        self.entries(dir)?
            .iter()
            .find(|e| e.name.as_slice() == name)
            .map(|e| e.inum)
            .ok_or(FsError::NoEntry("name not present in directory"))
    }

    fn dirlink(&mut self, dir: u64, name: &[u8], inum: u64) -> Result<(), FsError> {
        let entry =
            DirEntry::new(inum, name).ok_or(FsError::InvalidInput("invalid entry name"))?;
        let list = self.entries_mut(dir)?;
        list.try_reserve(1)
            .map_err(|_| FsError::NoSpace("entry list allocation failed"))?;
        list.push(entry);
        Ok(())
    }

    fn dirunlink(&mut self, dir: u64, name: &[u8]) -> Result<u64, FsError> {
        let list = self.entries_mut(dir)?;
        let pos = list
            .iter()
            .position(|e| e.name.as_slice() == name)
            .ok_or(FsError::NoEntry("name not present in directory"))?;
        Ok(list.remove(pos).inum)
    }

    fn dir_entries(&self, dir: u64) -> Result<&[DirEntry], FsError> {
        Ok(self.entries(dir)?.as_slice())
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/dir_test.rs"]
mod tests;
