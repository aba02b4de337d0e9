//! The path resolver and the namespace mutators.
//!
//! Resolution walks the entry lists one component at a time; `.` and `..`
//! need no special handling because every directory genuinely contains
//! them. The mutators keep the graph invariants intact by always touching
//! both sides of an edge in one operation: an entry appended means a link
//! count incremented, an entry detached means one decremented (or, for
//! `move`, the two cancel).
//!
//! Destruction ordering matters in `unlink`: the name edge is detached from
//! the parent before the inode is freed, so a freed record is never read.

use log::debug;

use ramfs_api::error::FsError;
use ramfs_api::fs::{DirectorySupport, FileSysSupport, InodeSupport, PathSupport};
use ramfs_api::types::{DirEntry, FType, Node, NodeData, DOT, DOTDOT, SEPARATOR};

use crate::inode_support::RamFs;

/// Name of the file system type in this crate, for the shared tests.
pub use crate::inode_support::FSName;

/// Rejects renames that would move a directory below itself (the
/// destination extends the source by a separator) and renames in which any
/// component of either path is literally `.` or `..`.
fn valid_rename(src: &[u8], dst: &[u8]) -> bool {
    if dst.len() > src.len() && dst.starts_with(src) && dst[src.len()] == SEPARATOR {
        return false;
    }
    let has_dot_component =
        |p: &[u8]| p.split(|&b| b == SEPARATOR).any(|c| c == DOT || c == DOTDOT);
    !has_dot_component(src) && !has_dot_component(dst)
}

impl PathSupport for RamFs {
    fn lookup(&self, path: &[u8]) -> Result<u64, FsError> {
        self.lookup_at(path, self.root_ino())
    }

    fn lookup_at(&self, path: &[u8], start: u64) -> Result<u64, FsError> {
        let mut cur = start;
        let mut rest = path;
        loop {
            if rest.first() == Some(&SEPARATOR) {
                rest = &rest[1..]; // optional separator before each component
            }
            if rest.is_empty() {
                return Ok(cur);
            }
            let list = match &self.node(cur)?.data {
                NodeData::Entries(list) => list,
                _ => {
                    debug!(
                        "lookup: component before {:?} is not a directory",
                        String::from_utf8_lossy(rest)
                    );
                    return Err(FsError::NotDir("path component is not a directory"));
                }
            };
            let n = rest
                .iter()
                .position(|&b| b == SEPARATOR)
                .unwrap_or(rest.len());
            let component = &rest[..n];
            // An empty component (from a doubled separator) matches nothing.
            match list.iter().find(|e| e.name.as_slice() == component) {
                Some(entry) => {
                    cur = entry.inum;
                    rest = &rest[n..];
                }
                None => return Err(FsError::NoEntry("no entry with a matching name")),
            }
        }
    }

    fn split_parent<'p>(&self, path: &'p [u8]) -> Result<(u64, &'p [u8]), FsError> {
        if path.is_empty() {
            return Err(FsError::NoEntry("empty path"));
        }
        if path[0] != SEPARATOR {
            return Err(FsError::InvalidInput("path must start with the separator"));
        }
        // The last separator divides parent path and basename.
        let cut = path.iter().rposition(|&b| b == SEPARATOR).unwrap();
        let (prefix, base) = (&path[..cut], &path[cut + 1..]);
        if base.is_empty() {
            debug!(
                "split_parent: {:?} has an empty final component",
                String::from_utf8_lossy(path)
            );
            return Err(FsError::NoEntry("path has an empty final component"));
        }
        let parent = self.lookup(prefix)?;
        if !self.node(parent)?.is_dir() {
            return Err(FsError::NotDir("parent of the final component is not a directory"));
        }
        Ok((parent, base))
    }

    fn add_node(&mut self, path: &[u8], inum: u64) -> Result<u64, FsError> {
        let (parent, base) = self.split_parent(path)?;
        if self.lookup_at(base, parent).is_ok() {
            return Err(FsError::Exists("an entry with this name already exists"));
        }
        self.node(inum)?; // the node to bind must be live
        self.dirlink(parent, base, inum)?;
        let node = self.node_mut(inum)?;
        node.nlink += 1;
        if node.parent == 0 {
            node.parent = parent;
        }
        Ok(inum)
    }

    fn mknod(&mut self, path: &[u8], mode: u32, uid: u32, gid: u32) -> Result<u64, FsError> {
        let inum = self.i_alloc(FType::TFile, mode, uid, gid)?;
        match self.add_node(path, inum) {
            Ok(inum) => Ok(inum),
            Err(e) => {
                // the fresh inode has no links yet, so this reclaims it
                let _ = self.i_free(inum);
                Err(e)
            }
        }
    }

    fn mkdir(&mut self, path: &[u8], mode: u32, uid: u32, gid: u32) -> Result<u64, FsError> {
        let inum = self.i_alloc(FType::TDir, mode, uid, gid)?;
        if let Err(e) = self.add_node(path, inum) {
            let _ = self.i_free(inum);
            return Err(e);
        }
        // Install the two standard entries; `..` adds a link to the parent.
        let parent = self.node(inum)?.parent;
        self.dirlink(inum, DOT, inum)?;
        self.node_mut(inum)?.nlink += 1;
        self.dirlink(inum, DOTDOT, parent)?;
        self.node_mut(parent)?.nlink += 1;
        Ok(inum)
    }

    fn link(&mut self, path: &[u8], newpath: &[u8]) -> Result<u64, FsError> {
        let inum = self.lookup(path)?;
        if self.node(inum)?.is_dir() {
            return Err(FsError::InvalidInput("cannot hard-link a directory"));
        }
        self.add_node(newpath, inum)
    }

    fn move_node(&mut self, path: &[u8], newpath: &[u8]) -> Result<u64, FsError> {
        let (old_parent, old_base) = self.split_parent(path)?;
        let (new_parent, new_base) = self.split_parent(newpath)?;
        if !DirEntry::valid_name(new_base) {
            return Err(FsError::InvalidInput("invalid entry name"));
        }
        // Reserve destination capacity first: once the source entry is
        // detached, the append must not be able to fail.
        if let NodeData::Entries(list) = &mut self.node_mut(new_parent)?.data {
            list.try_reserve(1)
                .map_err(|_| FsError::NoSpace("entry list allocation failed"))?;
        }
        let inum = self.dirunlink(old_parent, old_base)?;
        self.dirlink(new_parent, new_base, inum)?;
        Ok(inum)
    }

    fn rename(&mut self, path: &[u8], newpath: &[u8]) -> Result<(), FsError> {
        self.lookup(path)?;
        if path == newpath {
            return Ok(());
        }
        if !valid_rename(path, newpath) {
            return Err(FsError::InvalidInput(
                "rename would move a directory below itself or a dot entry",
            ));
        }
        if let Ok(existing) = self.lookup(newpath) {
            if self.node(existing)?.is_dir() {
                return Err(FsError::Exists("rename target is an existing directory"));
            }
            self.unlink(newpath)?;
        }
        self.move_node(path, newpath)?;
        Ok(())
    }

    fn unlink(&mut self, path: &[u8]) -> Result<(), FsError> {
        let (parent, base) = self.split_parent(path)?;
        if base == DOT || base == DOTDOT {
            return Err(FsError::InvalidInput("cannot unlink a dot entry"));
        }
        let target = self.lookup_at(base, parent)?;
        if self.node(target)?.is_dir() {
            if !self.dir_is_empty(target)? {
                return Err(FsError::NotEmpty("directory still has entries"));
            }
            // Detach the name edge before anything is freed.
            self.dirunlink(parent, base)?;
            self.dirunlink(target, DOTDOT)?;
            self.node_mut(parent)?.nlink -= 1; // `..` was referencing it
            // Name edge plus own `.`: nothing else can reference an empty
            // directory, so it goes unconditionally.
            debug_assert_eq!(self.node(target)?.nlink, 2);
            *self.node_mut(target)? = Node::default();
        } else {
            self.dirunlink(parent, base)?;
            let node = self.node_mut(target)?;
            node.nlink -= 1;
            if node.nlink == 0 && node.nopen == 0 {
                *node = Node::default();
            }
            // A still-open orphan stays live until its last handle closes.
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/path_test.rs"]
mod tests;
