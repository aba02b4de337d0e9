//! The inode table and the filesystem lifecycle.
//!
//! Inodes live in a table indexed by inode number. Slot 0 is allocated but
//! permanently free, so number 0 can act as the "no inode" sentinel; the
//! root sits at slot 1 and stays there for the life of the handle. A freed
//! slot is marked `TFree` and reused by the next allocation, lowest number
//! first.
//!
//! Teardown is the one place the `.`/`..` cycles must be broken explicitly:
//! the walk decrements a node's link count once per incoming edge and uses
//! the per-node visiting mark to process each node at most once. Orphan
//! files — zero links but still open when the handle goes down — are swept
//! at the end so every allocation is released.

use log::warn;

use ramfs_api::error::FsError;
use ramfs_api::fs::{FileSysSupport, InodeSupport};
use ramfs_api::types::{DirEntry, FType, Node, NodeData, TeardownReport, DOT, DOTDOT, ROOT_INUM};

/// Name of the file system type in this crate, for the shared tests.
pub type FSName = RamFs;

/// The in-memory filesystem. Owns every inode, and through them every entry
/// list and contents buffer in the graph.
#[derive(Debug)]
pub struct RamFs {
    nodes: Vec<Node>,
}

impl RamFs {
    /// Borrow the live node `i`, or fail with *no-such-entry*.
    pub(crate) fn node(&self, i: u64) -> Result<&Node, FsError> {
        match self.nodes.get(i as usize) {
            Some(n) if n.ft != FType::TFree => Ok(n),
            _ => Err(FsError::NoEntry("no inode allocated at this number")),
        }
    }

    /// Mutable counterpart of `node`.
    pub(crate) fn node_mut(&mut self, i: u64) -> Result<&mut Node, FsError> {
        match self.nodes.get_mut(i as usize) {
            Some(n) if n.ft != FType::TFree => Ok(n),
            _ => Err(FsError::NoEntry("no inode allocated at this number")),
        }
    }

    /// One step of teardown, rooted at node `i`.
    ///
    /// Every incoming edge leads to one call, so the link count is
    /// decremented unconditionally; the visiting mark then decides whether
    /// this call also gets to process the node. Cycles terminate because the
    /// second arrival at a node-in-progress returns at the mark.
    fn release_all(&mut self, i: u64, report: &mut TeardownReport) {
        let entries = {
            let node = match self.nodes.get_mut(i as usize) {
                Some(n) if n.ft != FType::TFree => n,
                _ => return,
            };
            node.nlink = node.nlink.saturating_sub(1);
            if node.visiting {
                return;
            }
            node.visiting = true;
            if node.nopen > 0 {
                warn!(
                    "teardown: releasing inode {} with {} open handle(s)",
                    i, node.nopen
                );
                report.open_files += 1;
            }
            match &mut node.data {
                NodeData::Entries(list) => std::mem::take(list),
                _ => Vec::new(),
            }
        };
        for entry in entries {
            self.release_all(entry.inum, report);
            // the entry record is dropped here
        }
        if let Some(node) = self.nodes.get_mut(i as usize) {
            node.visiting = false;
            if node.ft != FType::TFree && node.nlink == 0 {
                *node = Node::default();
                report.released += 1;
            }
        }
    }
}

impl FileSysSupport for RamFs {
    type Error = FsError;

    fn newfs() -> Result<Self, FsError> {
        let mut root = Node::new_dir(0o777, 0, 0);
        root.parent = ROOT_INUM;
        root.nlink = 1; // the conceptual name from outside the filesystem
        if let NodeData::Entries(list) = &mut root.data {
            list.push(DirEntry {
                inum: ROOT_INUM,
                name: DOT.to_vec(),
            });
            list.push(DirEntry {
                inum: ROOT_INUM,
                name: DOTDOT.to_vec(),
            });
        }
        root.nlink += 2; // `.` and `..` both point back at the root
        Ok(RamFs {
            nodes: vec![Node::default(), root],
        })
    }

    fn root_ino(&self) -> u64 {
        ROOT_INUM
    }

    fn live_nodes(&self) -> u64 {
        self.nodes.iter().filter(|n| n.ft != FType::TFree).count() as u64
    }

    fn teardown(mut self) -> TeardownReport {
        let mut report = TeardownReport::default();
        self.release_all(ROOT_INUM, &mut report);
        // Orphans have no name edge left, so the walk cannot reach them.
        for (i, node) in self.nodes.iter_mut().enumerate() {
            if node.ft != FType::TFree {
                warn!(
                    "teardown: releasing orphan inode {} with {} open handle(s)",
                    i, node.nopen
                );
                report.open_files += 1;
                *node = Node::default();
                report.released += 1;
            }
        }
        report
    }
}

impl InodeSupport for RamFs {
    type Inode = Node;

    fn i_get(&self, i: u64) -> Result<&Node, FsError> {
        self.node(i)
    }

    fn i_alloc(&mut self, ft: FType, mode: u32, uid: u32, gid: u32) -> Result<u64, FsError> {
        let fresh = match ft {
            FType::TFile => Node::new_file(mode, uid, gid),
            FType::TDir => Node::new_dir(mode, uid, gid),
            FType::TFree => return Err(FsError::InvalidInput("cannot allocate a free inode")),
        };
        // Slot 0 is the null sentinel and slot 1 the root; scan past both.
        for i in 2..self.nodes.len() {
            if self.nodes[i].ft == FType::TFree {
                self.nodes[i] = fresh;
                return Ok(i as u64);
            }
        }
        self.nodes
            .try_reserve(1)
            .map_err(|_| FsError::NoSpace("inode table allocation failed"))?;
        self.nodes.push(fresh);
        Ok((self.nodes.len() - 1) as u64)
    }

    fn i_free(&mut self, i: u64) -> Result<(), FsError> {
        let node = self.node_mut(i)?;
        if node.nlink != 0 || node.nopen != 0 {
            return Ok(());
        }
        *node = Node::default();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../api/fs-tests/inode_test.rs"]
mod tests;

#[cfg(test)]
#[path = "../../api/fs-tests/teardown_test.rs"]
mod teardown_tests;
