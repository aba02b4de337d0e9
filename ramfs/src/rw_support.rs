//! File contents and the open-count protocol.
//!
//! Contents are plain byte vectors owned by their inode. Reads clamp at the
//! end of the file; writes may grow it. The open count is what keeps a file
//! alive after its last name is gone: `unlink` leaves such an orphan in
//! place, and the last `i_close` reclaims it.

use std::cmp::min;

use ramfs_api::error::FsError;
use ramfs_api::fs::InodeRWSupport;
use ramfs_api::types::{Node, NodeData};

use crate::inode_support::RamFs;

/// Name of the file system type in this crate, for the shared tests.
pub use crate::inode_support::FSName;

impl InodeRWSupport for RamFs {
    fn i_read(&self, i: u64, buf: &mut [u8], off: u64) -> Result<u64, FsError> {
        let node = self.node(i)?;
        let data = node
            .contents_as_ref()
            .ok_or(FsError::InvalidInput("cannot read from a directory"))?;
        let len = data.len() as u64;
        if off > len {
            return Err(FsError::InvalidInput("read starts beyond the end of the file"));
        }
        let n = min(buf.len() as u64, len - off) as usize;
        let start = off as usize;
        buf[..n].copy_from_slice(&data[start..start + n]);
        Ok(n as u64)
    }

    fn i_write(&mut self, i: u64, data: &[u8], off: u64) -> Result<u64, FsError> {
        let node = self.node_mut(i)?;
        let buf = match &mut node.data {
            NodeData::Bytes(b) => b,
            _ => return Err(FsError::InvalidInput("cannot write to a directory")),
        };
        let len = buf.len() as u64;
        if off > len {
            return Err(FsError::InvalidInput("write starts beyond the end of the file"));
        }
        let end = off + data.len() as u64;
        if end > len {
            buf.try_reserve((end - len) as usize)
                .map_err(|_| FsError::NoSpace("file buffer allocation failed"))?;
            buf.resize(end as usize, 0);
        }
        let start = off as usize;
        buf[start..start + data.len()].copy_from_slice(data);
        Ok(data.len() as u64)
    }

    fn i_trunc(&mut self, i: u64, size: u64) -> Result<(), FsError> {
        let node = self.node_mut(i)?;
        let buf = match &mut node.data {
            NodeData::Bytes(b) => b,
            _ => return Err(FsError::InvalidInput("cannot truncate a directory")),
        };
        if size as usize > buf.len() {
            buf.try_reserve(size as usize - buf.len())
                .map_err(|_| FsError::NoSpace("file buffer allocation failed"))?;
        }
        buf.resize(size as usize, 0);
        Ok(())
    }

    fn i_open(&mut self, i: u64) -> Result<(), FsError> {
        let node = self.node_mut(i)?;
        if !node.is_file() {
            return Err(FsError::InvalidInput("only regular files carry an open count"));
        }
        node.nopen += 1;
        Ok(())
    }

    fn i_close(&mut self, i: u64) -> Result<(), FsError> {
        let node = self.node_mut(i)?;
        if node.nopen == 0 {
            return Err(FsError::InvalidInput("inode is not open"));
        }
        node.nopen -= 1;
        if node.nopen == 0 && node.nlink == 0 {
            // last handle on an orphan; no name edge can reach it anymore
            *node = Node::default();
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/rw_test.rs"]
mod tests;
